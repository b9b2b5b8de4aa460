//! Per-frame orchestration of the drawing session.
//!
//! One [`App::tick`] processes one detection: the recognizer classifies the
//! hand, drawing or the fired gesture command is applied to the canvas, and
//! finally any UI command for the same tick is run.

use crate::capture::{FileSaveConfig, FileSaver, ImageSaver, SaveError};
use crate::config::Config;
use crate::draw::canvas::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, PRESSURE_SCALE_RANGE};
use crate::draw::{BrushType, CanvasEngine, Raster, Stroke, compose};
use crate::gesture::{GestureRecognizer, GestureState, GestureType, Recognition};
use crate::input::{BrushProperty, CommandError, Detection, InteractionChannel, UiCommand};
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Pressure used for fingertip samples; the detector reports no force.
const FINGER_PRESSURE: f32 = 1.0;

/// What happened during one tick.
#[derive(Debug)]
pub struct TickOutcome {
    pub recognition: Recognition,
    /// Stroke committed this tick, if the finger left the drawing pose
    pub committed: Option<Stroke>,
    /// Gesture command applied this tick
    pub gesture_command: Option<GestureType>,
    /// UI command received this tick, with its result
    pub ui_command: Option<(UiCommand, Result<(), CommandError>)>,
    /// Result of a save requested this tick
    pub save: Option<Result<PathBuf, SaveError>>,
}

impl TickOutcome {
    fn new(recognition: Recognition) -> Self {
        Self {
            recognition,
            committed: None,
            gesture_command: None,
            ui_command: None,
            save: None,
        }
    }
}

/// Owns the canvas, the recognizer, and the save destination for one session.
pub struct App {
    canvas: CanvasEngine,
    recognizer: GestureRecognizer,
    save_config: FileSaveConfig,
    saver: Box<dyn ImageSaver>,
    camera_weight: f32,
    last_gesture: GestureType,
    ticks: u64,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_saver(config, Box::new(FileSaver))
    }

    /// Builds the session with a custom image sink.
    pub fn with_saver(config: &Config, saver: Box<dyn ImageSaver>) -> Self {
        let canvas = CanvasEngine::new(config.canvas_options());
        info!(
            "Canvas {}x{}, brush {} size {}",
            canvas.raster().width(),
            canvas.raster().height(),
            canvas.brush().brush,
            canvas.brush().size
        );
        Self {
            canvas,
            recognizer: GestureRecognizer::new(config.recognizer_options()),
            save_config: config.file_save_config(),
            saver,
            camera_weight: config.display.camera_weight.clamp(0.0, 1.0),
            last_gesture: GestureType::None,
            ticks: 0,
        }
    }

    pub fn canvas(&self) -> &CanvasEngine {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasEngine {
        &mut self.canvas
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Processes one frame's detection, then one UI command from `ui`.
    pub fn tick(
        &mut self,
        detection: &Detection,
        ui: &mut dyn InteractionChannel,
    ) -> TickOutcome {
        self.ticks += 1;

        let recognition = match &detection.hand {
            Some(hand) => self
                .recognizer
                .recognize_gesture(&hand.landmarks, hand.fingers),
            None => self.recognizer.hand_lost(),
        };
        if recognition.gesture != self.last_gesture {
            debug!(
                "Tick {}: gesture {} -> {} ({:?}, confidence {:.2})",
                self.ticks,
                self.last_gesture,
                recognition.gesture,
                recognition.state,
                recognition.confidence
            );
            self.last_gesture = recognition.gesture;
        }
        let mut outcome = TickOutcome::new(recognition);

        match (&detection.hand, recognition.gesture) {
            (Some(hand), GestureType::Draw) => {
                let tip = hand.landmarks.index_tip();
                let point = self.canvas.view().screen_to_canvas(tip.x, tip.y);
                self.canvas.draw(Some(point), FINGER_PRESSURE, true);
            }
            _ if self.canvas.is_drawing() => {
                outcome.committed = self.canvas.draw(None, FINGER_PRESSURE, false).cloned();
            }
            _ => {}
        }

        if recognition.state == GestureState::Completed && recognition.gesture.is_command() {
            self.run_gesture_command(recognition.gesture, &mut outcome);
        }

        let point = match &detection.hand {
            Some(hand) => {
                let tip = hand.landmarks.index_tip();
                Some((tip.x, tip.y))
            }
            None => detection.pointer,
        };
        let clicked = recognition.fired(GestureType::Select) || detection.clicked;
        if let Some(command) = ui.poll_interaction(point, clicked) {
            let result = self.run_ui_command(&command, &mut outcome);
            if let Err(err) = &result {
                warn!("Ignoring UI command {:?}: {}", command, err);
            }
            outcome.ui_command = Some((command, result));
        }

        outcome
    }

    fn run_gesture_command(&mut self, gesture: GestureType, outcome: &mut TickOutcome) {
        match gesture {
            GestureType::Clear => self.canvas.clear(),
            GestureType::Undo => {
                self.canvas.undo();
            }
            GestureType::Redo => {
                self.canvas.redo();
            }
            GestureType::Save => outcome.save = Some(self.save()),
            GestureType::ToolChange => {
                let brush = self.canvas.cycle_brush();
                info!("Switched to {} brush", brush);
            }
            GestureType::None | GestureType::Draw | GestureType::Select => return,
        }
        outcome.gesture_command = Some(gesture);
    }

    /// Applies one UI command. Rejected commands leave all state unchanged.
    fn run_ui_command(
        &mut self,
        command: &UiCommand,
        outcome: &mut TickOutcome,
    ) -> Result<(), CommandError> {
        match command {
            UiCommand::Clear => self.canvas.clear(),
            UiCommand::Undo => {
                self.canvas.undo();
            }
            UiCommand::Redo => {
                self.canvas.redo();
            }
            UiCommand::Save => outcome.save = Some(self.save()),
            UiCommand::ColorSelected { color } | UiCommand::SliderChanged { color } => {
                self.canvas.set_color(*color);
            }
            UiCommand::BrushSelected { name } => {
                let brush: BrushType = name
                    .parse()
                    .map_err(|_| CommandError::UnknownBrush(name.clone()))?;
                self.canvas.set_brush(brush);
                info!("Selected {} brush", brush);
            }
            UiCommand::BrushPropertyChanged { name, value } => {
                let property: BrushProperty = name.parse()?;
                self.set_brush_property(property, name, *value)?;
            }
            UiCommand::ZoomChanged { zoom } => {
                if !zoom.is_finite() {
                    return Err(CommandError::InvalidValue {
                        name: "zoom".to_string(),
                        value: *zoom as f64,
                    });
                }
                self.canvas.set_zoom(*zoom);
                debug!("View zoom set to {:.2}", self.canvas.view().zoom());
            }
            UiCommand::Pan { dx, dy } => {
                if let Some(bad) = [*dx, *dy].into_iter().find(|v| !v.is_finite()) {
                    return Err(CommandError::InvalidValue {
                        name: "pan".to_string(),
                        value: bad as f64,
                    });
                }
                self.canvas.pan_by(*dx, *dy);
            }
            UiCommand::ResetView => self.canvas.reset_view(),
        }
        Ok(())
    }

    fn set_brush_property(
        &mut self,
        property: BrushProperty,
        name: &str,
        value: f64,
    ) -> Result<(), CommandError> {
        let (min, max) = match property {
            BrushProperty::Size => (MIN_BRUSH_SIZE as f64, MAX_BRUSH_SIZE as f64),
            BrushProperty::PressureScale => (
                PRESSURE_SCALE_RANGE.0 as f64,
                PRESSURE_SCALE_RANGE.1 as f64,
            ),
            BrushProperty::Opacity | BrushProperty::Hardness | BrushProperty::Flow => (0.0, 1.0),
        };
        if !value.is_finite() || !(min..=max).contains(&value) {
            return Err(CommandError::InvalidValue {
                name: name.to_string(),
                value,
            });
        }

        match property {
            BrushProperty::Size => self.canvas.set_brush_size(value.round() as i64),
            BrushProperty::Opacity => self.canvas.set_opacity(value as f32),
            BrushProperty::Hardness => self.canvas.set_hardness(value as f32),
            BrushProperty::Flow => self.canvas.set_flow(value as f32),
            BrushProperty::PressureScale => self.canvas.set_pressure_scale(value as f32),
        }
        debug!("Brush {:?} set to {}", property, value);
        Ok(())
    }

    /// Writes the canvas to the next timestamped path.
    pub fn save(&mut self) -> Result<PathBuf, SaveError> {
        let path = self.save_config.next_path();
        match self.canvas.save_with(self.saver.as_ref(), &path) {
            Ok(saved) => {
                info!("Drawing saved to {}", saved.display());
                Ok(saved)
            }
            Err(err) => {
                error!("Failed to save drawing: {}", err);
                Err(err)
            }
        }
    }

    /// Display frame: the transformed canvas, blended over `camera` when given.
    pub fn render(&self, camera: Option<&Raster>) -> Raster {
        let canvas = self.canvas.get_transformed_canvas();
        match camera {
            Some(frame) => compose(frame, &canvas, self.camera_weight),
            None => canvas,
        }
    }

    /// Seals any in-flight stroke so nothing is left half-committed.
    pub fn shutdown(&mut self) -> Option<Stroke> {
        let sealed = self.canvas.draw(None, FINGER_PRESSURE, false).cloned();
        let metrics = self.canvas.metrics();
        let history = self.canvas.history();
        info!(
            "Session ended after {} ticks ({} history entries in {} KiB, avg draw {:.2} ms)",
            self.ticks,
            history.len(),
            history.byte_size() / 1024,
            metrics.avg_draw_ms
        );
        sealed
    }
}
