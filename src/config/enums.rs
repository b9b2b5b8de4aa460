//! Configuration enum types.

use crate::draw::{Rgb, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Config color - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "red"
///
/// # Custom RGB color (0-255 per component)
/// color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the color, using `fallback` (with a warning) for unknown names.
    pub fn to_color_or(&self, fallback: Rgb) -> Rgb {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!(
                    "Unknown color '{}', using {}",
                    name,
                    crate::util::color_to_name(&fallback)
                );
                fallback
            }),
            ColorSpec::Rgb(rgb) => Rgb::from(*rgb),
        }
    }

    /// Resolves the color; unknown names fall back to black.
    pub fn to_color(&self) -> Rgb {
        self.to_color_or(BLACK)
    }

    /// Whether a named color is known. RGB arrays are always valid.
    pub fn is_known(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

impl From<Rgb> for ColorSpec {
    fn from(color: Rgb) -> Self {
        ColorSpec::Rgb(color.into())
    }
}
