//! Hand gesture recognition.
//!
//! [`GestureRecognizer`] receives one landmark set per frame, scores it
//! against the finger signature of every [`GestureType`], and debounces the
//! discrete commands so each held pose fires exactly once.

pub mod landmarks;
pub mod recognizer;
pub mod signature;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use landmarks::{Finger, FingerState, HandLandmarks, Landmark, LandmarkError};
pub use recognizer::{
    DEFAULT_PRECEDENCE, GestureRecognizer, GestureState, Recognition, RecognizerOptions,
    normalize_precedence,
};
pub use signature::GestureType;
