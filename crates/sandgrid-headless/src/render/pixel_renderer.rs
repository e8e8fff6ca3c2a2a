//! CPU-based pixel buffer renderer for headless PNG capture
//!
//! Rasterises a world snapshot to an RGBA buffer without GPU dependencies.

use std::path::Path;

use anyhow::{Context, Result};
use sandgrid_core::world::{DrawQuad, Snapshot};

/// Background the canvas is cleared to before each frame
const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// CPU-based renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the canvas in pixels
    pub width: usize,
    /// Height of the canvas in pixels
    pub height: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Create a new pixel renderer with given canvas size
    pub fn new(width: usize, height: usize) -> Self {
        let mut renderer = Self {
            width,
            height,
            buffer: vec![0u8; width * height * 4],
        };
        renderer.clear();
        renderer
    }

    pub fn clear(&mut self) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }
    }

    /// Clear, then draw every quad in snapshot order
    pub fn render(&mut self, snapshot: &Snapshot) {
        self.clear();
        for quad in snapshot.quads() {
            self.fill_quad(quad);
        }
    }

    /// Fill the pixels whose top-left corner lies inside the quad, clipped to the canvas
    fn fill_quad(&mut self, quad: &DrawQuad) {
        let (min, max) = (quad.min().ceil(), quad.max().ceil());
        let x0 = (min.x.max(0.0) as usize).min(self.width);
        let y0 = (min.y.max(0.0) as usize).min(self.height);
        let x1 = (max.x.max(0.0) as usize).min(self.width);
        let y1 = (max.y.max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let idx = (y * self.width + x) * 4;
                self.buffer[idx..idx + 4].copy_from_slice(&quad.color);
            }
        }
    }

    /// Color at canvas pixel (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(color)
    }

    /// Save the buffer as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        use image::{ImageBuffer, Rgba};

        let path = path.as_ref();
        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width as u32, self.height as u32, self.buffer.clone())
                .context("Failed to create image from buffer")?;

        img.save(path)
            .with_context(|| format!("Failed to save frame: {}", path.display()))?;

        Ok(())
    }
}
