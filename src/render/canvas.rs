//! Drawing surface abstraction
//!
//! Game objects only ever need one primitive: fill a rectangle with a colour.
//! [`Canvas`] is that seam. The windowed [`Renderer`](super::Renderer) and the
//! software [`FrameBuffer`] used by headless runs both implement it.

use crate::object::Color;

use super::Rect;

/// A surface that rectangle objects can draw onto
pub trait Canvas {
    /// Drawable size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    /// Fill a rectangle; parts outside the surface are clipped
    fn fill_rect(&mut self, rect: &Rect, color: Color);
}

/// CPU-side RGBA8 surface
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    fill_count: usize,
}

impl FrameBuffer {
    /// Create a buffer filled with transparent black
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            fill_count: 0,
        }
    }

    /// Pixel at (x, y), or `None` outside the surface
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Raw pixel rows, top to bottom
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Number of `fill_rect` calls since the last clear
    #[must_use]
    pub fn fill_count(&self) -> usize {
        self.fill_count
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
        self.fill_count = 0;
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.fill_count += 1;

        let (min, max) = rect.bounds();
        let x0 = min.x.round().max(0.0) as u32;
        let y0 = min.y.round().max(0.0) as u32;
        let x1 = (max.x.round().max(0.0) as u32).min(self.width);
        let y1 = (max.y.round().max(0.0) as u32).min(self.height);

        let rgba = color.to_rgba8();
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = rgba;
            }
        }
    }
}
