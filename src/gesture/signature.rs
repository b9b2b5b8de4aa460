//! Finger signatures for each recognized gesture and their confidence scores.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::landmarks::{Finger, FingerState, HandLandmarks};

/// Gestures the recognizer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GestureType {
    #[default]
    None,
    Draw,
    Clear,
    Undo,
    Redo,
    Save,
    ToolChange,
    Select,
}

impl GestureType {
    /// Every gesture that has a finger signature.
    pub const RECOGNIZABLE: [GestureType; 7] = [
        GestureType::Draw,
        GestureType::Select,
        GestureType::Clear,
        GestureType::Undo,
        GestureType::Redo,
        GestureType::Save,
        GestureType::ToolChange,
    ];

    /// Commands fire once per held pose; drawing and selection are continuous.
    pub fn is_command(self) -> bool {
        matches!(
            self,
            GestureType::Clear
                | GestureType::Undo
                | GestureType::Redo
                | GestureType::Save
                | GestureType::ToolChange
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            GestureType::None => "none",
            GestureType::Draw => "draw",
            GestureType::Clear => "clear",
            GestureType::Undo => "undo",
            GestureType::Redo => "redo",
            GestureType::Save => "save",
            GestureType::ToolChange => "tool-change",
            GestureType::Select => "select",
        }
    }

    /// Finger constraints as `[thumb, index, middle, ring, pinky]`; `None` leaves a finger free.
    fn fingers(self) -> [Option<bool>; 5] {
        const U: Option<bool> = Some(true);
        const D: Option<bool> = Some(false);
        const X: Option<bool> = None;
        match self {
            GestureType::None => [X; 5],
            GestureType::Draw => [D, U, D, D, D],
            GestureType::Select => [X, X, U, U, U],
            GestureType::Clear => [D, D, D, D, D],
            GestureType::Undo => [D, U, U, D, D],
            GestureType::Redo => [D, U, U, U, D],
            GestureType::Save => [U, U, U, U, U],
            GestureType::ToolChange => [U, D, D, D, U],
        }
    }

    fn needs_pinch(self) -> bool {
        self == GestureType::Select
    }
}

impl std::fmt::Display for GestureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-frame inputs used to score every signature.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameFeatures {
    pub state: FingerState,
    /// Extension of each finger in `0.0..=1.0`.
    pub extension: [f32; 5],
    /// Thumb-index distance relative to hand size.
    pub pinch_distance: f32,
}

impl FrameFeatures {
    pub(crate) fn measure(hand: &HandLandmarks, state: Option<FingerState>) -> Self {
        let mut extension = [0.0; 5];
        for finger in Finger::ALL {
            extension[finger as usize] = hand.extension(finger);
        }
        Self {
            state: state.unwrap_or_else(|| FingerState::from_landmarks(hand)),
            extension,
            pinch_distance: hand.pinch_distance(),
        }
    }

    /// Confidence that the frame shows `gesture`, or `None` when the signature doesn't match.
    pub(crate) fn score(&self, gesture: GestureType, pinch_threshold: f32) -> Option<f32> {
        if gesture == GestureType::None {
            return None;
        }
        let mut total = 0.0;
        let mut terms = 0u32;
        for (idx, wanted) in gesture.fingers().iter().enumerate() {
            let Some(up) = *wanted else { continue };
            if self.state.0[idx] != up {
                return None;
            }
            let ext = self.extension[idx];
            total += if up { ext } else { 1.0 - ext };
            terms += 1;
        }
        if gesture.needs_pinch() {
            let limit = pinch_threshold.max(f32::EPSILON);
            if self.pinch_distance > limit {
                return None;
            }
            total += (1.0 - self.pinch_distance / limit).clamp(0.0, 1.0);
            terms += 1;
        }
        if terms == 0 {
            return None;
        }
        Some(total / terms as f32)
    }
}
