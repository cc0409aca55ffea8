//! XML document handling
//!
//! This module reads measurement XML into a lightweight element tree.
//! Namespace prefixes are dropped: the measCollec schema uses a single
//! default namespace and the model addresses elements by local name.

use crate::converters::DictConverter;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::MEASCOLLEC_NAMESPACE;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value as JsonValue};

/// XML Element in the document tree
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Local element name
    pub name: String,
    /// Attributes by local name, in source order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace declarations (prefix, uri); the default namespace has an empty prefix
    pub namespaces: Vec<(String, String)>,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append text content
    pub fn push_text(&mut self, text: &str) {
        match self.text {
            Some(ref mut existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Default namespace declared on this element
    pub fn default_namespace(&self) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(prefix, _)| prefix.is_empty())
            .map(|(_, uri)| uri.as_str())
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes(), &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, limits)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(closed) = element_stack.pop() {
                        doc.attach(&mut element_stack, closed);
                    }
                }
                Ok(Event::Empty(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, limits)?;
                    doc.attach(&mut element_stack, element);
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("cannot unescape text: {}", e)))?;
                    push_trimmed(element_stack.last_mut(), &text);
                }
                Ok(Event::CData(e)) => {
                    let raw = e.into_inner();
                    push_trimmed(element_stack.last_mut(), &String::from_utf8_lossy(&raw));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Declarations, comments, processing instructions
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml(format!(
                "Unexpected end of document inside <{}>",
                element_stack[element_stack.len() - 1].name
            )));
        }

        Ok(doc)
    }

    /// Parse element from BytesStart event
    fn parse_element(start: &BytesStart, limits: &Limits) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?;

        let mut element = Element::new(strip_prefix(name));

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            if attr_name == "xmlns" {
                element.namespaces.push((String::new(), attr_value));
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                element.namespaces.push((prefix.to_string(), attr_value));
            } else {
                element
                    .attributes
                    .insert(strip_prefix(attr_name).to_string(), attr_value);
            }
        }

        limits.check_attributes(element.attributes.len())?;

        Ok(element)
    }

    /// Hand a finished element to its parent, or make it the root
    fn attach(&mut self, open: &mut [Element], finished: Element) {
        match open.last_mut() {
            Some(parent) => parent.add_child(finished),
            None => self.root = Some(finished),
        }
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Convert the document into the nested mapping `{ root: {...} }`
    pub fn to_mapping(&self, converter: &DictConverter) -> Result<JsonValue> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| Error::Xml("XML document has no root element".to_string()))?;

        let mut wrapper = Map::new();
        wrapper.insert(root.local_name().to_string(), converter.decode(root));
        Ok(JsonValue::Object(wrapper))
    }
}

/// Parse XML text straight into the nested mapping consumed by the model
pub fn parse_mapping(xml: &str, limits: &Limits) -> Result<JsonValue> {
    parse_mapping_with(xml, limits, &DictConverter::new())
}

/// Parse XML text into a nested mapping using the given converter
pub fn parse_mapping_with(xml: &str, limits: &Limits, converter: &DictConverter) -> Result<JsonValue> {
    let doc = Document::parse(xml.as_bytes(), limits)?;
    if let Some(root) = doc.root() {
        match root.default_namespace() {
            Some(ns) if ns != MEASCOLLEC_NAMESPACE => {
                tracing::warn!(namespace = ns, root = root.local_name(), "unexpected default namespace");
            }
            _ => {}
        }
    }
    doc.to_mapping(converter)
}

fn push_trimmed(target: Option<&mut Element>, text: &str) {
    let text = text.trim();
    if let Some(element) = target {
        if !text.is_empty() {
            element.push_text(text);
        }
    }
}

fn strip_prefix(name: &str) -> &str {
    match name.split_once(':') {
        Some((_prefix, local)) => local,
        None => name,
    }
}
