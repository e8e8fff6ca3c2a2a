//! Simulation statistics collection trait

/// Trait for collecting per-tick simulation statistics
///
/// The stepper reports events through this trait so callers can count them
/// without the core depending on any reporting backend.
pub trait SimStats {
    /// Record that a particle changed cell during a tick
    fn record_particle_moved(&mut self);

    /// Record that a particle was in freefall during a tick
    fn record_freefall(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_particle_moved(&mut self) {}
    fn record_freefall(&mut self) {}
}

/// Plain counters, reset by the caller whenever it reports
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickCounters {
    pub particles_moved: u64,
    pub freefalling: u64,
}

impl TickCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for TickCounters {
    fn record_particle_moved(&mut self) {
        self.particles_moved += 1;
    }

    fn record_freefall(&mut self) {
        self.freefalling += 1;
    }
}
