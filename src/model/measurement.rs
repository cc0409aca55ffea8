//! Measurement types and values
//!
//! Both come in two encodings. Types are either one space-separated
//! `measTypes` text or repeated `measType` elements; values are either one
//! space-separated `measResults` text per `measValue` or repeated `r`
//! elements. Values are paired with types by position, wrapping around the
//! type list when a block reports several measured objects.

use serde_json::Value;

use super::node::{attr, child_text, compact_text, indexed_path, repeated, repeated_leaves, text};
use crate::error::Result;

/// One named measurement dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasType {
    /// Counter name
    pub name: String,
    /// `@p` ordinal, only present in the explicit encoding
    pub p: Option<String>,
}

impl MeasType {
    /// Create a measurement type
    pub fn new(name: impl Into<String>, p: Option<String>) -> Self {
        Self {
            name: name.into(),
            p,
        }
    }

    /// Decode all types declared by a `measInfo` node
    pub fn decode_all(meas_info: &Value, path: &str) -> Result<Vec<MeasType>> {
        if meas_info.get("measTypes").is_some() {
            return Ok(compact_text(meas_info, "measTypes", path)?
                .map(|names| {
                    names
                        .split(' ')
                        .map(|name| MeasType::new(name, None))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default());
        }

        let types = repeated_leaves(meas_info, "measType", path)?
            .into_iter()
            .map(|node| MeasType::new(text(node).unwrap_or_default(), attr(Some(node), "p")))
            .collect();
        Ok(types)
    }
}

/// One sampled value for one managed-object instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasValue {
    /// `@measObjLdn` of the enclosing `measValue`
    pub meas_obj_ldn: String,
    /// Raw value text
    pub value: String,
    /// `@p` ordinal
    pub p: Option<String>,
    /// `suspect` flag text
    pub suspect: Option<String>,
}

impl MeasValue {
    /// Decode all values under a `measInfo` node, in document order
    pub fn decode_all(meas_info: &Value, path: &str) -> Result<Vec<MeasValue>> {
        let mut values = Vec::new();
        for (i, node) in repeated(meas_info, "measValue", path)?.into_iter().enumerate() {
            Self::decode_node(node, &indexed_path(path, "measValue", i), &mut values)?;
        }
        Ok(values)
    }

    /// Decode one `measValue` node, appending to `out`
    pub fn decode_node(node: &Value, path: &str, out: &mut Vec<MeasValue>) -> Result<()> {
        let meas_obj_ldn = attr(Some(node), "measObjLdn").unwrap_or_default();
        let suspect = child_text(node, "suspect");

        if node.get("measResults").is_some() {
            let p = attr(Some(node), "p");
            if let Some(results) = compact_text(node, "measResults", path)? {
                out.extend(results.split(' ').map(|value| MeasValue {
                    meas_obj_ldn: meas_obj_ldn.clone(),
                    value: value.to_string(),
                    p: p.clone(),
                    suspect: suspect.clone(),
                }));
            }
            return Ok(());
        }

        for result in repeated_leaves(node, "r", path)? {
            out.push(MeasValue {
                meas_obj_ldn: meas_obj_ldn.clone(),
                value: text(result).unwrap_or_default(),
                p: attr(Some(result), "p"),
                suspect: suspect.clone(),
            });
        }
        Ok(())
    }

    /// Value as an integer, if it is one
    pub fn as_integer(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }
}

/// Type paired with the value at `index`: position `index mod T`.
///
/// Returns `None` when no types were declared.
pub fn paired_type(types: &[MeasType], index: usize) -> Option<&MeasType> {
    if types.is_empty() {
        return None;
    }
    types.get(index % types.len())
}
