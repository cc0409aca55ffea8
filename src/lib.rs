//! # meascollec
//!
//! Flattening of 3GPP TS 32.435 performance measurement files
//! (`measCollecFile`) into flat, 23-field records.
//!
//! ## Features
//!
//! - XML to nested mapping transcoding (`@attr` / `#text` convention)
//! - Normalization of single-vs-repeated nodes at every repeatable point
//! - Compact (`measTypes` / `measResults`) and explicit (`measType` / `r`)
//!   encodings
//! - Cyclic pairing of measurement values with measurement types
//! - JSON lines and `|`-delimited writers
//! - Protection against oversized and deeply nested documents
//!
//! ## Example
//!
//! ```rust,ignore
//! use meascollec::{MeasCollecFile, ParseMode, Provenance};
//! use meascollec::limits::Limits;
//!
//! let file = MeasCollecFile::from_xml(&xml, ParseMode::Lenient, &Limits::default())?;
//! let provenance = Provenance::new("s3://in/A.xml", "2024-01-01T00:20:00.000Z", "s3://out/A.json");
//! for record in file.records(&provenance) {
//!     println!("{:?}", record?);
//! }
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod locations;

pub mod loaders;
pub mod documents;

pub mod converters;
pub mod model;
pub mod records;

pub mod exports;
pub mod pipeline;

pub use error::{Error, FormatError, FormatErrorKind, Result};
pub use model::{MeasCollecFile, ParseMode};
pub use records::{record_header, Provenance, Record, RECORD_HEADER};

/// Version of the meascollec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 3GPP TS 32.435 measCollec namespace
pub const MEASCOLLEC_NAMESPACE: &str =
    "http://www.3gpp.org/ftp/specs/archive/32_series/32.435#measCollec";
