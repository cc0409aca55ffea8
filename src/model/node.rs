//! Node access and shape normalization
//!
//! The mapping produced from a measCollec file is ambiguous at every element
//! that may repeat: one occurrence is a mapping, several occurrences are a
//! sequence of mappings. [`Repeated`] captures both shapes and resolves them
//! into one ordered list, so the entity constructors never branch on shape.

use serde_json::Value;

use crate::error::{FormatError, Result};

/// Key holding element text when the element also has attributes
pub const TEXT_KEY: &str = "#text";

/// Prefix of attribute keys
pub const ATTR_PREFIX: &str = "@";

/// How missing required keys are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Missing required keys propagate as absent values
    #[default]
    Lenient,
    /// Missing required keys are format errors
    Strict,
}

impl ParseMode {
    /// Returns true for [`ParseMode::Strict`]
    pub fn is_strict(self) -> bool {
        matches!(self, ParseMode::Strict)
    }
}

/// One or many occurrences of a repeatable element
#[derive(Debug, Clone, Copy)]
pub enum Repeated<'a> {
    /// The element occurs once
    Single(&'a Value),
    /// The element occurs several times, in document order
    Many(&'a [Value]),
}

impl<'a> Repeated<'a> {
    /// Resolve a node that must hold mappings.
    ///
    /// An empty element (null) counts as an empty mapping.
    pub fn resolve(node: &'a Value, path: &str) -> Result<Self> {
        Self::resolve_with(node, path, false)
    }

    /// Resolve a node whose occurrences may also be plain text
    /// (an element without attributes, such as `<r>12</r>`).
    pub fn resolve_leaves(node: &'a Value, path: &str) -> Result<Self> {
        Self::resolve_with(node, path, true)
    }

    fn resolve_with(node: &'a Value, path: &str, text_ok: bool) -> Result<Self> {
        match node {
            Value::Array(items) => {
                if let Some((i, bad)) = items
                    .iter()
                    .enumerate()
                    .find(|(_, item)| !is_element(item, text_ok))
                {
                    return Err(FormatError::shape(format!("{}[{}]", path, i), describe(bad)).into());
                }
                Ok(Repeated::Many(items))
            }
            other if is_element(other, text_ok) => Ok(Repeated::Single(other)),
            other => Err(FormatError::shape(path, describe(other)).into()),
        }
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        match self {
            Repeated::Single(_) => 1,
            Repeated::Many(items) => items.len(),
        }
    }

    /// Check if there are no occurrences
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occurrences in document order
    pub fn into_vec(self) -> Vec<&'a Value> {
        match self {
            Repeated::Single(node) => vec![node],
            Repeated::Many(items) => items.iter().collect(),
        }
    }
}

fn is_element(node: &Value, text_ok: bool) -> bool {
    match node {
        Value::Object(_) | Value::Null => true,
        Value::String(_) | Value::Number(_) => text_ok,
        _ => false,
    }
}

/// Describe the shape of a node for error messages
pub fn describe(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Normalize the repeatable child `key` of `parent`; absent means none
pub fn repeated<'a>(parent: &'a Value, key: &str, path: &str) -> Result<Vec<&'a Value>> {
    match parent.get(key) {
        Some(node) => Ok(Repeated::resolve(node, &child_path(path, key))?.into_vec()),
        None => Ok(Vec::new()),
    }
}

/// Normalize the repeatable leaf child `key` of `parent`; absent means none
pub fn repeated_leaves<'a>(parent: &'a Value, key: &str, path: &str) -> Result<Vec<&'a Value>> {
    match parent.get(key) {
        Some(node) => Ok(Repeated::resolve_leaves(node, &child_path(path, key))?.into_vec()),
        None => Ok(Vec::new()),
    }
}

/// Look up a child that the file format requires
pub fn required_child<'a>(
    parent: &'a Value,
    key: &str,
    path: &str,
    mode: ParseMode,
) -> Result<Option<&'a Value>> {
    let node = parent.get(key);
    if node.is_none() && mode.is_strict() {
        return Err(FormatError::missing_required(child_path(path, key)).into());
    }
    Ok(node)
}

/// Text of a scalar or of a mapping's `#text`
pub fn text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get(TEXT_KEY).and_then(text),
        Value::Null | Value::Array(_) => None,
    }
}

/// Text of a space-separated compact child (`measTypes`, `measResults`).
///
/// An empty element gives `None`; anything other than text or a
/// `#text` mapping is a shape error.
pub fn compact_text(parent: &Value, key: &str, path: &str) -> Result<Option<String>> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(node @ (Value::String(_) | Value::Number(_))) => Ok(text(node)),
        Some(node @ Value::Object(map)) if map.contains_key(TEXT_KEY) => Ok(text(node)),
        Some(other) => Err(FormatError::shape(child_path(path, key), describe(other)).into()),
    }
}

/// Text of the child element `key`
pub fn child_text(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(text)
}

/// Attribute value, if the node and the attribute exist
pub fn attr(node: Option<&Value>, name: &str) -> Option<String> {
    node?.get(format!("{}{}", ATTR_PREFIX, name).as_str()).and_then(text)
}

/// Optional attribute, empty string when absent
pub fn optional_attr(node: Option<&Value>, name: &str) -> String {
    attr(node, name).unwrap_or_default()
}

/// Required attribute, passed through as absent unless parsing strictly
pub fn required_attr(
    node: Option<&Value>,
    name: &str,
    path: &str,
    mode: ParseMode,
) -> Result<Option<String>> {
    let value = attr(node, name);
    if value.is_none() && mode.is_strict() {
        return Err(FormatError::missing_required(format!("{}/{}{}", path, ATTR_PREFIX, name)).into());
    }
    Ok(value)
}

/// Path of a child node
pub fn child_path(path: &str, key: &str) -> String {
    format!("{}/{}", path, key)
}

/// Path of the `index`-th occurrence of a repeatable child
pub fn indexed_path(path: &str, key: &str, index: usize) -> String {
    format!("{}/{}[{}]", path, key, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FormatErrorKind};
    use serde_json::json;

    #[test]
    fn test_resolve_single_mapping() {
        let node = json!({"@measInfoId": "A"});
        let resolved = Repeated::resolve(&node, "measInfo").unwrap();
        assert!(matches!(resolved, Repeated::Single(_)));
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_resolve_sequence_keeps_order() {
        let node = json!([{"@id": "0"}, {"@id": "1"}, {"@id": "2"}]);
        let items = Repeated::resolve(&node, "measInfo").unwrap().into_vec();
        let ids: Vec<_> = items.iter().map(|n| attr(Some(n), "id").unwrap()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_resolve_null_is_empty_mapping() {
        let node = Value::Null;
        assert_eq!(Repeated::resolve(&node, "measData").unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_rejects_scalar() {
        let node = json!("oops");
        let err = Repeated::resolve(&node, "measCollecFile/measData").unwrap_err();
        match err {
            Error::Format(f) => {
                assert_eq!(f.kind, FormatErrorKind::Shape);
                assert_eq!(f.path.as_deref(), Some("measCollecFile/measData"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_bad_item_in_sequence() {
        let node = json!([{"@p": "1"}, true]);
        let err = Repeated::resolve_leaves(&node, "measValue/r").unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::Shape));
        assert!(err.to_string().contains("measValue/r[1]"));
    }

    #[test]
    fn test_resolve_leaves_accepts_text() {
        let node = json!(["5", {"@p": "2", "#text": "6"}]);
        assert_eq!(Repeated::resolve_leaves(&node, "r").unwrap().len(), 2);
        assert!(Repeated::resolve(&node, "r").is_err());
    }

    #[test]
    fn test_repeated_absent_key() {
        let parent = json!({"managedElement": {}});
        assert!(repeated(&parent, "measInfo", "measData").unwrap().is_empty());
    }

    #[test]
    fn test_text_variants() {
        assert_eq!(text(&json!("a")), Some("a".to_string()));
        assert_eq!(text(&json!({"@p": "1", "#text": "7"})), Some("7".to_string()));
        assert_eq!(text(&json!(12)), Some("12".to_string()));
        assert_eq!(text(&Value::Null), None);
    }

    #[test]
    fn test_compact_text_shapes() {
        let node = json!({
            "a": "1 2",
            "b": {"@p": "1", "#text": "3 4"},
            "c": null,
            "d": ["1 2", "3 4"],
            "e": {"@p": "1"}
        });
        assert_eq!(compact_text(&node, "a", "mv").unwrap().as_deref(), Some("1 2"));
        assert_eq!(compact_text(&node, "b", "mv").unwrap().as_deref(), Some("3 4"));
        assert_eq!(compact_text(&node, "c", "mv").unwrap(), None);
        assert_eq!(compact_text(&node, "missing", "mv").unwrap(), None);

        let err = compact_text(&node, "d", "mv").unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::Shape));
        assert!(err.to_string().contains("(at mv/d)"));
        assert!(compact_text(&node, "e", "mv").is_err());
    }

    #[test]
    fn test_attr_accessors() {
        let node = json!({"@vendorName": "Acme"});
        assert_eq!(attr(Some(&node), "vendorName").as_deref(), Some("Acme"));
        assert_eq!(optional_attr(Some(&node), "dnPrefix"), "");
        assert_eq!(optional_attr(None, "dnPrefix"), "");
    }

    #[test]
    fn test_required_attr_modes() {
        let node = json!({});
        assert_eq!(
            required_attr(Some(&node), "duration", "granPeriod", ParseMode::Lenient).unwrap(),
            None
        );
        let err = required_attr(Some(&node), "duration", "granPeriod", ParseMode::Strict)
            .unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::MissingRequired));
        assert!(err.to_string().contains("granPeriod/@duration"));
    }

    #[test]
    fn test_required_child_modes() {
        let parent = json!({});
        assert!(required_child(&parent, "fileHeader", "measCollecFile", ParseMode::Lenient)
            .unwrap()
            .is_none());
        assert!(required_child(&parent, "fileHeader", "measCollecFile", ParseMode::Strict).is_err());
    }
}
