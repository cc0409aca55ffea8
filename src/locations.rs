//! Resource location resolution
//!
//! Provenance fields carry the locator of the source file and of the
//! transformed output. A locator is either a URL (`s3://bucket/key`,
//! `https://...`) or a local file path.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Resource location - a URL or a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (s3, http, https, ...)
    Url(Url),
}

impl Location {
    /// Create a location from a string (auto-detect type)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Config("empty locator".to_string()));
        }

        // Drive letters ("C:\...") parse as URLs with a one-letter scheme
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "file" {
                let path = url
                    .to_file_path()
                    .map_err(|_| Error::Config(format!("invalid file URL '{}'", s)))?;
                return Ok(Location::Path(path));
            }
            if url.scheme().len() > 1 {
                return Ok(Location::Url(url));
            }
        }

        Ok(Location::Path(PathBuf::from(s)))
    }

    /// Create a location for a local path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Location::Path(path.as_ref().to_path_buf())
    }

    /// Append a relative child (e.g. `raw_transform_json/file.json`)
    pub fn join(&self, child: &str) -> Result<Self> {
        let child = child.trim_start_matches('/');
        match self {
            Location::Path(p) => Ok(Location::Path(p.join(child))),
            Location::Url(u) => {
                let base = u.as_str().trim_end_matches('/');
                Ok(Location::Url(Url::parse(&format!("{}/{}", base, child))?))
            }
        }
    }

}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(p) => write!(f, "{}", p.display()),
            Location::Url(u) => f.write_str(u.as_str()),
        }
    }
}
