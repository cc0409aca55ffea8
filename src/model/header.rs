//! File header and footer entities

use serde_json::Value;

use super::node::{optional_attr, required_attr, ParseMode};
use crate::error::Result;

/// Collection timestamps, used as begin time in the header and end time in the footer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasCollect {
    /// `@beginTime`
    pub begin_time: String,
    /// `@endTime`
    pub end_time: String,
}

impl MeasCollect {
    /// Build from a `measCollec` node
    pub fn from_node(node: Option<&Value>) -> Self {
        Self {
            begin_time: optional_attr(node, "beginTime"),
            end_time: optional_attr(node, "endTime"),
        }
    }
}

/// Sender identity in the file header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSender {
    /// `@localDn`
    pub local_dn: String,
    /// `@elementType`
    pub element_type: String,
}

impl FileSender {
    /// Build from a `fileSender` node
    pub fn from_node(node: Option<&Value>) -> Self {
        Self {
            local_dn: optional_attr(node, "localDn"),
            element_type: optional_attr(node, "elementType"),
        }
    }
}

/// Document header metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// `@fileFormatVersion`; required by the format
    pub file_format_version: Option<String>,
    /// `@vendorName`
    pub vendor_name: String,
    /// `@dnPrefix`
    pub dn_prefix: String,
    /// Sender identity
    pub file_sender: FileSender,
    /// Collection begin time
    pub meas_collect: MeasCollect,
}

impl FileHeader {
    /// Build from a `fileHeader` node
    pub fn from_node(node: Option<&Value>, path: &str, mode: ParseMode) -> Result<Self> {
        Ok(Self {
            file_format_version: required_attr(node, "fileFormatVersion", path, mode)?,
            vendor_name: optional_attr(node, "vendorName"),
            dn_prefix: optional_attr(node, "dnPrefix"),
            file_sender: FileSender::from_node(node.and_then(|n| n.get("fileSender"))),
            meas_collect: MeasCollect::from_node(node.and_then(|n| n.get("measCollec"))),
        })
    }
}

/// Document footer metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFooter {
    /// Collection end time
    pub meas_collect: MeasCollect,
}

impl FileFooter {
    /// Build from a `fileFooter` node
    pub fn from_node(node: Option<&Value>) -> Self {
        Self {
            meas_collect: MeasCollect::from_node(node.and_then(|n| n.get("measCollec"))),
        }
    }
}
