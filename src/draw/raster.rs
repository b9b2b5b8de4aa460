//! Fixed-size RGB pixel buffer backing the canvas.

use super::color::Rgb;
use crate::util::Rect;

/// Row-major RGB raster.
///
/// Dimensions never change after construction; every mutating call ignores
/// coordinates outside the buffer instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-raster rectangle, or `None` for a zero-sized raster.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Raw pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Alpha-over blends `color` onto the pixel at `(x, y)`.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i], alpha);
        }
    }

    /// Fills the whole raster with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Copies the pixels under `rect` (clipped to the raster) into a patch.
    pub fn capture(&self, rect: Rect) -> Option<RasterPatch> {
        let rect = rect.clamp_to_bounds(self.width as i32, self.height as i32)?;
        let mut pixels = Vec::with_capacity(rect.width as usize * rect.height as usize);
        for y in rect.y..rect.y + rect.height {
            let start = y as usize * self.width as usize + rect.x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + rect.width as usize]);
        }
        Some(RasterPatch { rect, pixels })
    }

    /// Writes a previously captured patch back into the raster.
    pub fn apply(&mut self, patch: &RasterPatch) {
        let row_len = patch.rect.width as usize;
        for (row, y) in (patch.rect.y..patch.rect.y + patch.rect.height).enumerate() {
            let Some(start) = self.index(patch.rect.x, y) else {
                continue;
            };
            let src = &patch.pixels[row * row_len..(row + 1) * row_len];
            self.pixels[start..start + row_len].copy_from_slice(src);
        }
    }
}

/// A rectangular copy of raster pixels, used to restore regions exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPatch {
    rect: Rect,
    pixels: Vec<Rgb>,
}

impl RasterPatch {
    /// A patch covering no pixels; applying it is a no-op.
    pub fn empty() -> Self {
        Self {
            rect: Rect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            },
            pixels: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Approximate heap footprint in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Rgb>()
    }
}
