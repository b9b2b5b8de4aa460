//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::BrushType;
use crate::gesture::{DEFAULT_PRECEDENCE, GestureType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas size, background, and history depth.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 16 - 8192)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 16 - 8192)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Color the canvas starts with and that `clear` and the eraser restore
    #[serde(default = "default_background")]
    pub background_color: ColorSpec,

    /// Number of undo steps kept; older edits are dropped (0 = unlimited)
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background_color: default_background(),
            max_history: default_max_history(),
        }
    }
}

/// Brush used when the session starts.
///
/// All values can be changed at runtime through the UI channel or the
/// tool-change gesture.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Brush type: standard, airbrush, calligraphy, marker, pencil, watercolor, neon, pixel, eraser
    #[serde(default)]
    pub kind: BrushType,

    /// Brush diameter in pixels (valid range: 1 - 200)
    #[serde(default = "default_brush_size")]
    pub size: u32,

    /// Stamp opacity (0.0 - 1.0)
    #[serde(default = "default_unit_one")]
    pub opacity: f32,

    /// Edge hardness: 1.0 is a hard disk, 0.0 a soft falloff (0.0 - 1.0)
    #[serde(default = "default_hardness")]
    pub hardness: f32,

    /// Paint deposited per stamp (0.0 - 1.0)
    #[serde(default = "default_unit_one")]
    pub flow: f32,

    /// Multiplier applied to per-point pressure (0.1 - 4.0)
    #[serde(default = "default_unit_one")]
    pub pressure_scale: f32,

    /// Brush color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_brush_color")]
    pub color: ColorSpec,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            kind: BrushType::default(),
            size: default_brush_size(),
            opacity: default_unit_one(),
            hardness: default_hardness(),
            flow: default_unit_one(),
            pressure_scale: default_unit_one(),
            color: default_brush_color(),
        }
    }
}

/// Gesture recognizer tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Minimum match confidence for a pose to count (0.0 - 1.0)
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f32,

    /// Frames a command pose must be held before it fires (1 - 60)
    #[serde(default = "default_debounce_frames")]
    pub debounce_frames: usize,

    /// Hand-less frames after which a fired gesture may fire again (1 - 600)
    #[serde(default = "default_reset_after_missing_frames")]
    pub reset_after_missing_frames: usize,

    /// Thumb-to-index distance, relative to hand size, that counts as a pinch (0.05 - 1.0)
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f32,

    /// Number of recent observations kept (at least `debounce_frames`)
    #[serde(default = "default_history_len")]
    pub history_len: usize,

    /// Order in which poses are tried when more than one matches.
    /// Gestures left out keep their default relative order after the listed ones.
    #[serde(default = "default_precedence")]
    pub precedence: Vec<GestureType>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            detection_threshold: default_detection_threshold(),
            debounce_frames: default_debounce_frames(),
            reset_after_missing_frames: default_reset_after_missing_frames(),
            pinch_threshold: default_pinch_threshold(),
            history_len: default_history_len(),
            precedence: default_precedence(),
        }
    }
}

/// Where and how saved drawings are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for saved drawings (supports ~ for home directory)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template with chrono format specifiers
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format; only "png" is supported
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// Display composition settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisplayConfig {
    /// Weight of the camera frame when blended under the canvas (0.0 - 1.0)
    #[serde(default = "default_camera_weight")]
    pub camera_weight: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            camera_weight: default_camera_weight(),
        }
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_max_history() -> usize {
    20
}

fn default_brush_size() -> u32 {
    15
}

fn default_unit_one() -> f32 {
    1.0
}

fn default_hardness() -> f32 {
    0.5
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_detection_threshold() -> f32 {
    0.75
}

fn default_debounce_frames() -> usize {
    3
}

fn default_reset_after_missing_frames() -> usize {
    5
}

fn default_pinch_threshold() -> f32 {
    0.35
}

fn default_history_len() -> usize {
    30
}

fn default_precedence() -> Vec<GestureType> {
    DEFAULT_PRECEDENCE.to_vec()
}

fn default_save_directory() -> String {
    "~/Pictures/Fingerpaint".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_camera_weight() -> f32 {
    0.5
}
