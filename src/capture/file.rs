//! File saving for canvas exports.

use super::types::SaveError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save drawings to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("output"))
                .join("Fingerpaint"),
            filename_template: "drawing_%Y-%m-%d_%H%M%S".to_string(),
            format: "png".to_string(),
        }
    }
}

impl FileSaveConfig {
    /// Full path for a save made right now.
    pub fn next_path(&self) -> PathBuf {
        self.save_directory
            .join(generate_filename(&self.filename_template, &self.format))
    }
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), SaveError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| SaveError::Write {
            path: directory.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write encoded image bytes to `path`, creating parent directories.
///
/// # Returns
/// Path of the written file
pub fn save_image(image_data: &[u8], path: &Path) -> Result<PathBuf, SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        path.display(),
        image_data.len()
    );

    fs::write(path, image_data).map_err(|source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Drawing saved: {}", path.display());
    Ok(path.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Abstraction over where encoded images end up. Mocked in tests.
pub trait ImageSaver {
    fn save(&self, image_data: &[u8], path: &Path) -> Result<PathBuf, SaveError>;
}

/// Writes images to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSaver;

impl ImageSaver for FileSaver {
    fn save(&self, image_data: &[u8], path: &Path) -> Result<PathBuf, SaveError> {
        save_image(image_data, path)
    }
}
