//! Pan/zoom view transform applied when presenting the canvas.

use super::color::Rgb;
use super::raster::Raster;

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 8.0;

/// Maps canvas coordinates to screen coordinates: `screen = canvas × zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        zoom: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
    };

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Sets the zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            log::warn!("Ignoring non-finite zoom {}", zoom);
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Shifts the view by a screen-space offset.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Converts a screen point into canvas coordinates.
    pub fn screen_to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Renders `raster` through the transform into a same-sized image.
    ///
    /// Screen pixels that map outside the canvas show `background`. Uses
    /// nearest-neighbour sampling.
    pub fn apply(&self, raster: &Raster, background: Rgb) -> Raster {
        if self.is_identity() {
            return raster.clone();
        }

        let mut out = Raster::new(raster.width(), raster.height(), background);
        for sy in 0..raster.height() as i32 {
            for sx in 0..raster.width() as i32 {
                let (cx, cy) = self.screen_to_canvas(sx as f32 + 0.5, sy as f32 + 0.5);
                if let Some(color) = raster.get(cx.floor() as i32, cy.floor() as i32) {
                    out.set(sx, sy, color);
                }
            }
        }
        out
    }
}
