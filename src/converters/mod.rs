//! XML to mapping converters
//!
//! This module turns the parsed element tree into the nested mapping the
//! measurement model consumes (tags and `@`-prefixed attributes as keys,
//! element text under `#text`).

mod base;
mod dict;

pub use base::{ConverterConfig, ElementData};
pub use dict::DictConverter;
