//! Utility functions for colors and raster geometry.
//!
//! This module provides:
//! - Color name lookup used by the config file and UI commands
//! - [`Rect`], the axis-aligned rectangle used for dirty regions and history patches

use crate::draw::{Rgb, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Rgb values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
///
/// # Returns
/// - `Some(Rgb)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Rgb> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a color to its human-readable name, or "Custom" if it is not in the palette.
pub fn color_to_name(color: &Rgb) -> &'static str {
    const NAMED: [(Rgb, &str); 8] = [
        (RED, "Red"),
        (GREEN, "Green"),
        (BLUE, "Blue"),
        (YELLOW, "Yellow"),
        (ORANGE, "Orange"),
        (PINK, "Pink"),
        (WHITE, "White"),
        (BLACK, "Black"),
    ];

    NAMED
        .iter()
        .find(|(named, _)| named == color)
        .map(|(_, name)| *name)
        .unwrap_or("Custom")
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle, returning `None` for empty or negative sizes.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);

        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Clips the rectangle to `0..width` × `0..height`, returning `None` if nothing remains.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }
}
