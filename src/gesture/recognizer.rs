//! Stateful gesture recognizer: classification plus frame-count debounce.

use std::collections::VecDeque;

use log::{debug, info};

use super::landmarks::{FingerState, HandLandmarks};
use super::signature::{FrameFeatures, GestureType};

/// Default precedence for frames matching more than one signature.
pub const DEFAULT_PRECEDENCE: [GestureType; 7] = [
    GestureType::Draw,
    GestureType::Select,
    GestureType::Clear,
    GestureType::Undo,
    GestureType::Redo,
    GestureType::Save,
    GestureType::ToolChange,
];

/// Lifecycle of the gesture reported for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Nothing to act on.
    #[default]
    None,
    /// Pose is held but not yet confirmed; always reported for drawing.
    InProgress,
    /// The pose was just confirmed. Reported once per held pose.
    Completed,
}

/// Result of one recognizer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recognition {
    pub gesture: GestureType,
    pub confidence: f32,
    pub state: GestureState,
}

impl Recognition {
    pub fn idle(confidence: f32) -> Self {
        Self {
            gesture: GestureType::None,
            confidence,
            state: GestureState::None,
        }
    }

    /// True for the single frame on which `gesture` fires.
    pub fn fired(&self, gesture: GestureType) -> bool {
        self.gesture == gesture && self.state == GestureState::Completed
    }
}

impl From<Recognition> for (GestureType, f32, GestureState) {
    fn from(r: Recognition) -> Self {
        (r.gesture, r.confidence, r.state)
    }
}

/// Recognizer tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerOptions {
    /// Minimum confidence for a signature match to count.
    pub detection_threshold: f32,
    /// Consecutive matching frames before a command gesture fires.
    pub debounce_frames: usize,
    /// Consecutive hand-less frames before the fired latch is released.
    pub reset_after_missing_frames: usize,
    /// Maximum thumb-index distance, relative to hand size, that counts as a pinch.
    pub pinch_threshold: f32,
    /// Number of recent observations kept.
    pub history_len: usize,
    /// Order in which signatures are tried.
    pub precedence: Vec<GestureType>,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            detection_threshold: 0.75,
            debounce_frames: 3,
            reset_after_missing_frames: 5,
            pinch_threshold: 0.35,
            history_len: 30,
            precedence: DEFAULT_PRECEDENCE.to_vec(),
        }
    }
}

/// Makes a precedence list contain every recognizable gesture exactly once.
///
/// Keeps the first occurrence of each entry, drops `None`, and appends any
/// missing gesture in default order.
pub fn normalize_precedence(order: &[GestureType]) -> Vec<GestureType> {
    let mut out: Vec<GestureType> = Vec::with_capacity(DEFAULT_PRECEDENCE.len());
    for gesture in order.iter().chain(DEFAULT_PRECEDENCE.iter()) {
        if *gesture != GestureType::None && !out.contains(gesture) {
            out.push(*gesture);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Observation {
    gesture: GestureType,
    confidence: f32,
}

/// Turns per-frame hand landmarks into debounced gesture events.
///
/// Owns its session state (recent observations, the last fired gesture, and
/// the missing-hand counter) and nothing else.
#[derive(Debug)]
pub struct GestureRecognizer {
    options: RecognizerOptions,
    history: VecDeque<Observation>,
    last_fired: Option<GestureType>,
    missing_frames: usize,
}

impl GestureRecognizer {
    pub fn new(options: RecognizerOptions) -> Self {
        let debounce_frames = options.debounce_frames.max(1);
        let options = RecognizerOptions {
            detection_threshold: options.detection_threshold.clamp(0.0, 1.0),
            debounce_frames,
            reset_after_missing_frames: options.reset_after_missing_frames.max(1),
            pinch_threshold: options.pinch_threshold.max(f32::EPSILON),
            history_len: options.history_len.max(debounce_frames),
            precedence: normalize_precedence(&options.precedence),
        };
        Self {
            history: VecDeque::with_capacity(options.history_len),
            options,
            last_fired: None,
            missing_frames: 0,
        }
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    /// Classifies one frame with a detected hand.
    ///
    /// `fingers` is the detector's own up/down vector when it supplies one;
    /// otherwise it is derived from the landmarks.
    pub fn recognize_gesture(
        &mut self,
        hand: &HandLandmarks,
        fingers: Option<FingerState>,
    ) -> Recognition {
        self.missing_frames = 0;
        let features = FrameFeatures::measure(hand, fingers);
        let (gesture, confidence) = self.classify(&features);
        self.observe(gesture, confidence)
    }

    /// Records a frame without a hand.
    ///
    /// Any pending candidate is dropped at once. The fired latch survives
    /// brief dropouts and is released after `reset_after_missing_frames`.
    pub fn hand_lost(&mut self) -> Recognition {
        self.history.clear();
        self.missing_frames = self.missing_frames.saturating_add(1);
        if self.missing_frames == self.options.reset_after_missing_frames {
            debug!(
                "Hand missing for {} frames; resetting recognizer",
                self.missing_frames
            );
            self.last_fired = None;
        }
        Recognition::idle(0.0)
    }

    /// Clears all session state.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_fired = None;
        self.missing_frames = 0;
    }

    /// Gesture currently latched as fired, if any.
    pub fn last_fired(&self) -> Option<GestureType> {
        self.last_fired
    }

    /// Number of observations currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// First signature in precedence order whose confidence clears the threshold.
    ///
    /// When nothing qualifies the frame is `None`, carrying the best
    /// sub-threshold score so callers can show how close the pose was.
    fn classify(&self, features: &FrameFeatures) -> (GestureType, f32) {
        let mut best_rejected: Option<f32> = None;
        for gesture in &self.options.precedence {
            let Some(score) = features.score(*gesture, self.options.pinch_threshold) else {
                continue;
            };
            if score >= self.options.detection_threshold {
                return (*gesture, score);
            }
            best_rejected = Some(best_rejected.map_or(score, |best| best.max(score)));
        }
        (GestureType::None, best_rejected.unwrap_or(0.0))
    }

    fn observe(&mut self, gesture: GestureType, confidence: f32) -> Recognition {
        if self.history.len() >= self.options.history_len {
            self.history.pop_front();
        }
        self.history.push_back(Observation {
            gesture,
            confidence,
        });

        if self.last_fired.is_some_and(|fired| fired != gesture) {
            self.last_fired = None;
        }

        match gesture {
            GestureType::None => Recognition::idle(confidence),
            GestureType::Draw => Recognition {
                gesture,
                confidence,
                state: GestureState::InProgress,
            },
            _ if self.last_fired == Some(gesture) => Recognition::idle(confidence),
            _ => {
                let held = self.trailing_run(gesture);
                let state = if held >= self.options.debounce_frames {
                    info!("Gesture {gesture} confirmed (confidence {confidence:.2})");
                    self.last_fired = Some(gesture);
                    GestureState::Completed
                } else {
                    GestureState::InProgress
                };
                Recognition {
                    gesture,
                    confidence,
                    state,
                }
            }
        }
    }

    /// Consecutive most-recent observations of `gesture`.
    fn trailing_run(&self, gesture: GestureType) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|obs| obs.gesture == gesture)
            .count()
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(RecognizerOptions::default())
    }
}
