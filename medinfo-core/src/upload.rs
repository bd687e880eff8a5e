//! Medicine image upload policy

use crate::error::{MedinfoError, Result};

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// 5 MiB
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePolicy {
    allowed_extensions: Vec<String>,
    max_bytes: usize,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()),
            DEFAULT_MAX_IMAGE_BYTES,
        )
    }
}

impl ImagePolicy {
    pub fn new(allowed_extensions: impl IntoIterator<Item = String>, max_bytes: usize) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_bytes,
        }
    }

    /// Validate an uploaded file and return its normalized extension
    pub fn check(&self, original_filename: &str, size: usize) -> Result<String> {
        let ext = image_extension(original_filename)
            .filter(|ext| self.allowed_extensions.iter().any(|allowed| allowed == ext))
            .ok_or_else(|| MedinfoError::validation("Invalid file type"))?;

        if size > self.max_bytes {
            return Err(MedinfoError::PayloadTooLarge {
                limit: self.max_bytes,
            });
        }
        if size == 0 {
            return Err(MedinfoError::validation("File cannot be empty"));
        }

        Ok(ext)
    }
}

/// Lowercased extension after the last dot. Rejects anything that is not
/// plain ASCII alphanumerics so it can be embedded in a stored filename.
pub fn image_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Stored filename for a medicine image: `med_{id}_{unix_timestamp}.{ext}`
pub fn medicine_image_filename(medicine_id: i64, ext: &str, timestamp: i64) -> String {
    format!("med_{}_{}.{}", medicine_id, timestamp, ext)
}
