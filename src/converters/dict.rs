//! Dictionary Convention Converter
//!
//! Produces the nested mapping shape used by xmltodict-style transcoders:
//! - Attributes become keys with the attribute prefix (`@name`)
//! - Text becomes `#text` when the element also has attributes or children
//! - A text-only element becomes a plain string, an empty one becomes null
//! - A repeated child tag becomes an array in document order, a single
//!   occurrence stays a plain value
//!
//! The single-vs-repeated difference is exactly the ambiguity the model
//! layer normalizes.

use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

use super::base::{ConverterConfig, ElementData};
use crate::documents::Element;

/// Dictionary convention converter
#[derive(Debug, Clone, Default)]
pub struct DictConverter {
    config: ConverterConfig,
}

impl DictConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Decode an element and its subtree
    pub fn decode(&self, elem: &Element) -> JsonValue {
        let mut data = ElementData::from_element(elem);
        for child in &elem.children {
            data.content
                .push((child.local_name().to_string(), self.decode(child)));
        }
        self.decode_data(&data)
    }

    /// Decode element data whose children are already decoded
    pub fn decode_data(&self, data: &ElementData) -> JsonValue {
        if !data.has_attributes() && !data.has_content() {
            return data
                .text()
                .map(|s| JsonValue::String(s.to_string()))
                .unwrap_or(JsonValue::Null);
        }

        let mut result = Map::new();
        let attr_prefix = self.config.attr_prefix();

        for (name, value) in &data.attributes {
            result.insert(
                format!("{}{}", attr_prefix, name),
                JsonValue::String(value.clone()),
            );
        }

        let mut repeated: HashSet<&str> = HashSet::new();
        for (name, value) in &data.content {
            let forced = self.config.is_forced_list(name);
            match result.get_mut(name) {
                Some(JsonValue::Array(arr)) if forced || repeated.contains(name.as_str()) => {
                    arr.push(value.clone());
                }
                Some(existing) => {
                    // Second occurrence turns the entry into an array
                    let old = existing.take();
                    *existing = JsonValue::Array(vec![old, value.clone()]);
                    repeated.insert(name);
                }
                None if forced => {
                    result.insert(name.clone(), JsonValue::Array(vec![value.clone()]));
                }
                None => {
                    result.insert(name.clone(), value.clone());
                }
            }
        }

        if let Some(text) = data.text() {
            result.insert(
                self.config.text_key().to_string(),
                JsonValue::String(text.to_string()),
            );
        }

        JsonValue::Object(result)
    }
}
