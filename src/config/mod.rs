//! Configuration file support for fingerpaint.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/fingerpaint/config.toml`. Settings include the canvas size,
//! the starting brush, gesture recognizer tuning, save location, and display blending.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{BrushConfig, CanvasConfig, DisplayConfig, GestureConfig, OutputConfig};

use crate::capture::FileSaveConfig;
use crate::capture::file::expand_tilde;
use crate::draw::canvas::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, PRESSURE_SCALE_RANGE};
use crate::draw::{BrushSettings, CanvasOptions, color};
use crate::gesture::{RecognizerOptions, normalize_precedence};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest and largest accepted canvas dimension.
const CANVAS_DIMENSION_RANGE: (u32, u32) = (16, 8192);

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1280
/// height = 720
/// background_color = "white"
///
/// [brush]
/// kind = "watercolor"
/// size = 24
/// color = [255, 128, 0]
///
/// [gesture]
/// detection_threshold = 0.8
/// debounce_frames = 4
/// precedence = ["draw", "clear", "select"]
///
/// [output]
/// save_directory = "~/Pictures/Fingerpaint"
///
/// [display]
/// camera_weight = 0.4
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size, background, and history depth
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Starting brush
    #[serde(default)]
    pub brush: BrushConfig,

    /// Gesture recognizer tuning
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Save location and filename
    #[serde(default)]
    pub output: OutputConfig,

    /// Camera/canvas blending
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width` / `canvas.height`: 16 - 8192
    /// - `brush.size`: 1 - 200
    /// - `brush.opacity`, `brush.hardness`, `brush.flow`: 0.0 - 1.0
    /// - `brush.pressure_scale`: 0.1 - 4.0
    /// - `gesture.detection_threshold`: 0.0 - 1.0
    /// - `gesture.debounce_frames`: 1 - 60
    /// - `gesture.reset_after_missing_frames`: 1 - 600
    /// - `gesture.pinch_threshold`: 0.05 - 1.0
    /// - `gesture.history_len`: at least `debounce_frames`
    /// - `display.camera_weight`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        let (min_dim, max_dim) = CANVAS_DIMENSION_RANGE;
        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(min_dim..=max_dim).contains(&*value) {
                log::warn!(
                    "Invalid canvas {} {}, clamping to {}-{} range",
                    name,
                    value,
                    min_dim,
                    max_dim
                );
                *value = (*value).clamp(min_dim, max_dim);
            }
        }

        if !self.canvas.background_color.is_known() {
            log::warn!(
                "Unknown background_color {:?}, falling back to white",
                self.canvas.background_color
            );
            self.canvas.background_color = ColorSpec::Name("white".to_string());
        }

        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.brush.size) {
            log::warn!(
                "Invalid brush size {}, clamping to {}-{} range",
                self.brush.size,
                MIN_BRUSH_SIZE,
                MAX_BRUSH_SIZE
            );
            self.brush.size = self.brush.size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        }

        clamp_f32("brush opacity", &mut self.brush.opacity, 0.0, 1.0, 1.0);
        clamp_f32("brush hardness", &mut self.brush.hardness, 0.0, 1.0, 0.5);
        clamp_f32("brush flow", &mut self.brush.flow, 0.0, 1.0, 1.0);
        let (min_scale, max_scale) = PRESSURE_SCALE_RANGE;
        clamp_f32(
            "brush pressure_scale",
            &mut self.brush.pressure_scale,
            min_scale,
            max_scale,
            1.0,
        );

        if !self.brush.color.is_known() {
            log::warn!(
                "Unknown brush color {:?}, falling back to black",
                self.brush.color
            );
            self.brush.color = ColorSpec::Name("black".to_string());
        }

        let gesture = &mut self.gesture;
        clamp_f32(
            "detection_threshold",
            &mut gesture.detection_threshold,
            0.0,
            1.0,
            0.75,
        );
        clamp_f32(
            "pinch_threshold",
            &mut gesture.pinch_threshold,
            0.05,
            1.0,
            0.35,
        );

        if !(1..=60).contains(&gesture.debounce_frames) {
            log::warn!(
                "Invalid debounce_frames {}, clamping to 1-60 range",
                gesture.debounce_frames
            );
            gesture.debounce_frames = gesture.debounce_frames.clamp(1, 60);
        }

        if !(1..=600).contains(&gesture.reset_after_missing_frames) {
            log::warn!(
                "Invalid reset_after_missing_frames {}, clamping to 1-600 range",
                gesture.reset_after_missing_frames
            );
            gesture.reset_after_missing_frames = gesture.reset_after_missing_frames.clamp(1, 600);
        }

        if gesture.history_len < gesture.debounce_frames {
            log::warn!(
                "history_len {} is shorter than debounce_frames {}, raising it",
                gesture.history_len,
                gesture.debounce_frames
            );
            gesture.history_len = gesture.debounce_frames;
        }

        let precedence = normalize_precedence(&gesture.precedence);
        if precedence != gesture.precedence {
            debug!(
                "Gesture precedence normalized from {:?} to {:?}",
                gesture.precedence, precedence
            );
            gesture.precedence = precedence;
        }

        if !self.output.format.eq_ignore_ascii_case("png") {
            log::warn!(
                "Unsupported output format '{}', falling back to 'png'",
                self.output.format
            );
        }
        self.output.format = "png".to_string();

        if self.output.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, using the default");
            self.output.filename_template = OutputConfig::default().filename_template;
        }

        clamp_f32(
            "camera_weight",
            &mut self.display.camera_weight,
            0.0,
            1.0,
            0.5,
        );
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/fingerpaint/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("fingerpaint");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is absent.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Canvas construction parameters from the `[canvas]` and `[brush]` sections.
    pub fn canvas_options(&self) -> CanvasOptions {
        CanvasOptions {
            width: self.canvas.width,
            height: self.canvas.height,
            background: self.canvas.background_color.to_color_or(color::WHITE),
            max_history: self.canvas.max_history,
            brush: BrushSettings {
                brush: self.brush.kind,
                size: self.brush.size,
                opacity: self.brush.opacity,
                hardness: self.brush.hardness,
                flow: self.brush.flow,
                pressure_scale: self.brush.pressure_scale,
                color: self.brush.color.to_color(),
            },
        }
    }

    /// Recognizer parameters from the `[gesture]` section.
    pub fn recognizer_options(&self) -> RecognizerOptions {
        RecognizerOptions {
            detection_threshold: self.gesture.detection_threshold,
            debounce_frames: self.gesture.debounce_frames,
            reset_after_missing_frames: self.gesture.reset_after_missing_frames,
            pinch_threshold: self.gesture.pinch_threshold,
            history_len: self.gesture.history_len,
            precedence: self.gesture.precedence.clone(),
        }
    }

    /// Save settings from the `[output]` section.
    pub fn file_save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: expand_tilde(&self.output.save_directory),
            filename_template: self.output.filename_template.clone(),
            format: self.output.format.clone(),
        }
    }
}

/// Clamps `value` into `min..=max`, replacing non-finite values with `fallback`.
fn clamp_f32(name: &str, value: &mut f32, min: f32, max: f32, fallback: f32) {
    if !value.is_finite() {
        log::warn!("Invalid {} {}, using {:.2}", name, value, fallback);
        *value = fallback;
    } else if !(min..=max).contains(&*value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {:.2}-{:.2} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}
