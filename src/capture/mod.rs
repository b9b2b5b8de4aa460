//! Saving the canvas as a standard image file.
//!
//! This module provides:
//! - PNG encoding of the canvas raster (Cairo)
//! - Timestamped output paths and directory creation
//! - The [`ImageSaver`] seam used by the application to write files

pub mod file;
pub mod png;
pub mod types;

pub use file::{FileSaveConfig, FileSaver, ImageSaver};
pub use png::encode_png;
pub use types::SaveError;
