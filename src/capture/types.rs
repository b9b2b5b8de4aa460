//! Error types for saving the canvas.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving the canvas.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Canvas is empty ({width}x{height}), nothing to encode")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
