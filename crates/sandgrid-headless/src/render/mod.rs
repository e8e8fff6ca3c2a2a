//! Rendering of world snapshots without a GPU

mod pixel_renderer;

pub use pixel_renderer::PixelRenderer;
