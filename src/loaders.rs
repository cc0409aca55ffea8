//! Resource loading utilities
//!
//! This module loads staged measurement files from the local filesystem.
//! Fetching the file from an object store happens before this point.

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::Path;

/// Resource loader for staged measurement files
#[derive(Debug, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Load a file as a string
    pub fn load_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| {
            Error::Resource(format!("Failed to stat file '{}': {}", path.display(), e))
        })?;

        // Reject oversized files before reading them
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        self.limits.check_xml_size(size)?;

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded input file");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<measCollecFile/>").unwrap();

        let content = Loader::new().load_file(file.path()).unwrap();
        assert_eq!(content, "<measCollecFile/>");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Loader::new()
            .load_file(Path::new("/nonexistent/A20240101.xml"))
            .unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
    }

    #[test]
    fn test_load_file_over_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", "x".repeat(64)).unwrap();

        let limits = Limits {
            max_xml_size: 16,
            ..Limits::default()
        };
        let err = Loader::new()
            .with_limits(limits)
            .load_file(file.path())
            .unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }
}
