//! Limits and constraints for measurement file processing
//!
//! A measCollecFile nests six elements deep and carries a handful of
//! attributes per element, so anything far past that is rejected before
//! the element tree grows.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Input guards applied while loading and parsing XML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted file, in bytes
    pub max_xml_size: usize,

    /// Deepest accepted element nesting
    pub max_xml_depth: usize,

    /// Most attributes accepted on one element
    pub max_attributes: usize,
}

const MIB: usize = 1024 * 1024;

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_size: 512 * MIB,
            max_xml_depth: 64,
            max_attributes: 256,
        }
    }
}

impl Limits {
    /// Default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_xml_size: 32 * MIB,
            max_xml_depth: 16,
            max_attributes: 32,
        }
    }

    /// Loose limits for very large collection files
    pub fn permissive() -> Self {
        Self {
            max_xml_size: usize::MAX,
            max_xml_depth: 1024,
            max_attributes: 4096,
        }
    }

    /// Reject a file larger than `max_xml_size`
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        within("file size (bytes)", size, self.max_xml_size)
    }

    /// Reject nesting deeper than `max_xml_depth`
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        within("element depth", depth, self.max_xml_depth)
    }

    /// Reject an element with more than `max_attributes` attributes
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        within("attribute count", count, self.max_attributes)
    }
}

impl FromStr for Limits {
    type Err = Error;

    /// Select a preset by name: `default`, `strict` or `permissive`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Limits::default()),
            "strict" => Ok(Limits::strict()),
            "permissive" => Ok(Limits::permissive()),
            other => Err(Error::Config(format!(
                "unknown limits preset '{}'. Use: default, strict, permissive",
                other
            ))),
        }
    }
}

fn within(what: &str, actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::LimitExceeded(format!(
            "{} {} is over the maximum of {}",
            what, actual, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_meas_collec_nesting() {
        let limits = Limits::default();
        // measCollecFile/measData/measInfo/measValue/r
        assert!(limits.check_xml_depth(5).is_ok());
        assert!(limits.check_xml_depth(65).is_err());
    }

    #[test]
    fn test_presets_are_ordered() {
        let strict = Limits::strict();
        let permissive = Limits::permissive();
        let default = Limits::new();

        assert!(strict.max_xml_size < default.max_xml_size);
        assert!(permissive.max_xml_depth > default.max_xml_depth);
        assert!(strict.check_xml_depth(17).is_err());
        assert!(permissive.check_xml_depth(500).is_ok());
    }

    #[test]
    fn test_size_error_message() {
        let err = Limits::strict().check_xml_size(64 * MIB).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
        assert!(err.to_string().contains("file size (bytes) 67108864"));
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("strict".parse::<Limits>().unwrap(), Limits::strict());
        assert_eq!(" Permissive ".parse::<Limits>().unwrap(), Limits::permissive());
        assert_eq!("default".parse::<Limits>().unwrap(), Limits::default());
        assert!(matches!("huge".parse::<Limits>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_check_attributes() {
        let limits = Limits::default();
        assert!(limits.check_attributes(5).is_ok());
        assert!(limits.check_attributes(257).is_err());
    }
}
