//! Canvas engine and raster drawing primitives.
//!
//! This module defines the core drawing types:
//! - [`Rgb`]: 8-bit color with predefined palette constants
//! - [`Raster`]: the canvas pixel buffer
//! - [`BrushType`] / [`BrushSettings`]: the stamp-based brush model
//! - [`CanvasEngine`]: strokes, commands, undo/redo history, and persistence
//! - [`ViewTransform`] and [`compose`]: presentation of the canvas over the camera feed

pub mod brush;
pub mod canvas;
pub mod color;
pub mod compose;
pub mod history;
pub mod raster;
pub mod stroke;
pub mod transform;

// Re-export commonly used types at module level
pub use brush::{BrushSettings, BrushType};
pub use canvas::{CanvasEngine, CanvasOptions, DrawMetrics};
pub use color::Rgb;
pub use compose::compose;
pub use history::Edit;
pub use raster::Raster;
pub use stroke::{Stroke, StrokePoint};
pub use transform::ViewTransform;

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
