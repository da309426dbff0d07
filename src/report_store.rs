//! Flat-file storage for generated deck reports
//!
//! Reports are written as `deck_<timestamp>.txt` in the output directory
//! and served back by filename for download. Files persist indefinitely;
//! there is no eviction.

use crate::error::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Flat-file store for generated reports
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    /// Create a store rooted at the output directory, creating it if needed
    pub fn new(output_dir: &Path) -> Self {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            log::warn!("Failed to create output directory: {}", e);
        } else {
            log::info!("Report output directory: {:?}", output_dir);
        }

        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Write a report to a timestamped file, returning its filename
    pub fn save(&self, report: &str) -> Result<String> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("deck_{}.txt", timestamp);
        let path = self.output_dir.join(&filename);

        std::fs::write(&path, report)?;
        log::debug!("Saved report to {:?}", path);

        Ok(filename)
    }

    /// Read back a stored report. `None` when the file does not exist;
    /// callers must check [`is_safe_filename`] before calling.
    pub fn load(&self, filename: &str) -> Option<Vec<u8>> {
        let path = self.output_dir.join(filename);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(_) => None,
        }
    }

}

/// Reject filenames that could escape the output directory. Checked before
/// any filesystem access.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.contains("..") && !filename.starts_with('/') && !filename.starts_with('\\')
}
