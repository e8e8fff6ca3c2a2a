//! RNG trait abstraction for World simulation
//!
//! The world owns its generator (seeded once at construction) and threads it
//! through the stepper, so a fixed seed plus a fixed input sequence always
//! reproduces the same grid. Tests can substitute a scripted generator.

/// Random number generator trait for World simulation
pub trait WorldRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate a uniform integer in `0..=max`
    fn gen_up_to(&mut self, max: u32) -> u32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Uniform byte in `lo..=hi`, used for particle colors
    fn gen_channel(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        lo + self.gen_up_to(u32::from(hi - lo)) as u8
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_up_to(&mut self, max: u32) -> u32 {
        rand::Rng::gen_range(self, 0..=max)
    }
}
