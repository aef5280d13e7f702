//! Custom error types for Casual Capture
//!
//! This module defines the error hierarchy for the capture core using
//! thiserror. Filesystem errors carry the path they relate to so the UI layer
//! can report them without extra context.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for Casual Capture operations
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O errors not tied to a journal operation
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for settings and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The vault (or asset) directory could not be created
    #[error("Failed to create directory {}: {reason}", path.display())]
    DirectoryCreation { path: PathBuf, reason: String },

    /// Mode bits could not be applied. Logged, never returned by the stores.
    #[error("Failed to normalize permissions on {}: {reason}", path.display())]
    PermissionNormalization { path: PathBuf, reason: String },

    /// A journal file holds bytes that are not valid UTF-8
    #[error("Failed to decode {} as UTF-8: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Append or overwrite failed
    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// Every candidate asset filename for this second is taken
    #[error("Asset name already taken: {name}")]
    NameCollision { name: String },

    /// Pasted bytes could not be decoded or re-encoded as an image
    #[error("Image error: {0}")]
    Image(String),
}

impl CaptureError {
    /// Create a directory creation error for a path
    pub fn directory_creation(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::DirectoryCreation {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a write error for a path
    pub fn write(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a decode error for a path
    pub fn decode(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Capture cannot proceed at all after a fatal error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DirectoryCreation { .. })
    }

    /// Check if this is a write failure
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

/// Result type alias for Casual Capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaptureError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_write_error_display() {
        let err = CaptureError::write("/vault/2024-03-07.txt", "disk full");
        assert_eq!(
            err.to_string(),
            "Failed to write /vault/2024-03-07.txt: disk full"
        );
        assert!(err.is_write());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_directory_creation_is_fatal() {
        let err = CaptureError::directory_creation("/vault", "permission denied");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_name_collision_display() {
        let err = CaptureError::NameCollision {
            name: "090501.png".into(),
        };
        assert_eq!(err.to_string(), "Asset name already taken: 090501.png");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let capture_err: CaptureError = io_err.into();
        assert!(matches!(capture_err, CaptureError::Io(_)));
    }
}
