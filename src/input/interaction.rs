//! Discrete commands from the on-screen UI.
//!
//! These bypass gesture recognition and are applied after the gesture-driven
//! work of the same tick.

use crate::draw::Rgb;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Command emitted by a UI widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    Clear,
    Undo,
    Redo,
    Save,
    /// A palette swatch was picked
    ColorSelected { color: Rgb },
    /// The RGB sliders moved
    SliderChanged { color: Rgb },
    /// A brush button was picked; `name` is a brush type name
    BrushSelected { name: String },
    /// A brush property slider moved
    BrushPropertyChanged { name: String, value: f64 },
    /// The zoom slider moved; clamped to the view's zoom range
    ZoomChanged { zoom: f32 },
    /// The view was dragged by a screen-space offset
    Pan { dx: f32, dy: f32 },
    /// Back to the identity view
    ResetView,
}

/// Brush properties adjustable from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushProperty {
    Size,
    Opacity,
    Hardness,
    Flow,
    PressureScale,
}

impl FromStr for BrushProperty {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "size" | "brush_size" => Ok(BrushProperty::Size),
            "opacity" => Ok(BrushProperty::Opacity),
            "hardness" => Ok(BrushProperty::Hardness),
            "flow" => Ok(BrushProperty::Flow),
            "pressure_scale" | "pressure" => Ok(BrushProperty::PressureScale),
            _ => Err(CommandError::UnknownProperty(s.to_string())),
        }
    }
}

/// Why a UI command was ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown brush '{0}'")]
    UnknownBrush(String),

    #[error("Unknown brush property '{0}'")]
    UnknownProperty(String),

    #[error("Invalid value {value} for '{name}'")]
    InvalidValue { name: String, value: f64 },
}

/// Source of UI commands, polled once per tick.
///
/// `point` is the current interaction position (index fingertip, or pointer
/// when no hand is tracked) and `clicked` whether a selection happened this tick.
pub trait InteractionChannel {
    fn poll_interaction(&mut self, point: Option<(f32, f32)>, clicked: bool) -> Option<UiCommand>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_tagged_json() {
        let cmd: UiCommand =
            serde_json::from_str(r#"{"type":"color_selected","color":[255,0,0]}"#).unwrap();
        assert_eq!(
            cmd,
            UiCommand::ColorSelected {
                color: Rgb::new(255, 0, 0)
            }
        );

        let cmd: UiCommand = serde_json::from_str(
            r#"{"type":"brush_property_changed","name":"opacity","value":0.4}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            UiCommand::BrushPropertyChanged {
                name: "opacity".to_string(),
                value: 0.4
            }
        );

        let cmd: UiCommand = serde_json::from_str(r#"{"type":"undo"}"#).unwrap();
        assert_eq!(cmd, UiCommand::Undo);
    }

    #[test]
    fn view_commands_parse_from_tagged_json() {
        let cmd: UiCommand = serde_json::from_str(r#"{"type":"zoom_changed","zoom":2.5}"#).unwrap();
        assert_eq!(cmd, UiCommand::ZoomChanged { zoom: 2.5 });

        let cmd: UiCommand = serde_json::from_str(r#"{"type":"pan","dx":-4,"dy":8}"#).unwrap();
        assert_eq!(cmd, UiCommand::Pan { dx: -4.0, dy: 8.0 });

        let cmd: UiCommand = serde_json::from_str(r#"{"type":"reset_view"}"#).unwrap();
        assert_eq!(cmd, UiCommand::ResetView);
    }

    #[test]
    fn property_names_are_forgiving() {
        assert_eq!("Size".parse::<BrushProperty>(), Ok(BrushProperty::Size));
        assert_eq!(
            "pressure-scale".parse::<BrushProperty>(),
            Ok(BrushProperty::PressureScale)
        );
        assert_eq!(
            "glitter".parse::<BrushProperty>(),
            Err(CommandError::UnknownProperty("glitter".to_string()))
        );
    }
}
