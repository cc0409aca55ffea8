//! Base converter types
//!
//! This module provides the configuration and intermediate element data
//! shared by the XML-to-mapping conversion.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use crate::documents::Element;

/// Configuration for converters
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Key used for text content when an element also has attributes or children
    text_key: String,
    /// Prefix for attribute names in decoded output
    attr_prefix: String,
    /// Tags that always decode to a sequence, even on a single occurrence
    force_list: HashSet<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            text_key: "#text".to_string(),
            attr_prefix: "@".to_string(),
            force_list: HashSet::new(),
        }
    }
}

impl ConverterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text key
    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    /// Get the attribute prefix
    pub fn attr_prefix(&self) -> &str {
        &self.attr_prefix
    }

    /// Check if a tag is always decoded as a sequence
    pub fn is_forced_list(&self, tag: &str) -> bool {
        self.force_list.contains(tag)
    }

    /// Set text key
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    /// Set attribute prefix
    pub fn with_attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attr_prefix = prefix.into();
        self
    }

    /// Always decode the given tag as a sequence
    pub fn with_force_list(mut self, tag: impl Into<String>) -> Self {
        self.force_list.insert(tag.into());
        self
    }
}

/// Element data for conversion to a mapping
///
/// Holds one element with its children already decoded.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The text content
    pub text: Option<String>,
    /// Decoded children in document order
    pub content: Vec<(String, JsonValue)>,
    /// Element attributes
    pub attributes: IndexMap<String, String>,
}

impl ElementData {
    /// Take text and attributes from a document element
    pub fn from_element(elem: &Element) -> Self {
        Self {
            text: elem.text.clone(),
            content: Vec::with_capacity(elem.children.len()),
            attributes: elem.attributes.clone(),
        }
    }

    /// Get the text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Check if the element has child content
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Check if the element has attributes
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}
