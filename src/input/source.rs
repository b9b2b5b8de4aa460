//! Per-frame hand detections delivered by the external landmark detector.

use crate::gesture::{FingerState, HandLandmarks};
use thiserror::Error;

/// The single tracked hand in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    pub landmarks: HandLandmarks,
    /// Up/down vector computed by the detector, when it provides one
    pub fingers: Option<FingerState>,
}

/// Everything the detector reports for one camera frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// `None` when no hand was found
    pub hand: Option<HandFrame>,
    /// Pointer position for UI interaction when no hand is tracked
    pub pointer: Option<(f32, f32)>,
    /// Explicit click from the pointer device
    pub clicked: bool,
}

impl Detection {
    pub fn no_hand() -> Self {
        Self::default()
    }

    pub fn with_hand(landmarks: HandLandmarks) -> Self {
        Self {
            hand: Some(HandFrame {
                landmarks,
                fingers: None,
            }),
            ..Self::default()
        }
    }
}

/// Errors from the frame source. All of them end the session.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Camera/input device unreadable: {0}")]
    Device(#[from] std::io::Error),
}

/// Produces one [`Detection`] per tick.
///
/// `Ok(None)` means the source is exhausted or the user asked to quit.
pub trait LandmarkSource {
    fn detect(&mut self) -> Result<Option<Detection>, SourceError>;
}
