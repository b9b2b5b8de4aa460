//! Inputs consumed by the application loop.
//!
//! Two external collaborators feed the session: a [`LandmarkSource`] that
//! yields one hand detection per camera frame, and an [`InteractionChannel`]
//! that yields discrete UI commands.

pub mod interaction;
pub mod source;

// Re-export commonly used types at module level
pub use interaction::{BrushProperty, CommandError, InteractionChannel, UiCommand};
pub use source::{Detection, HandFrame, LandmarkSource, SourceError};
