//! Managed element, job and period entities

use serde_json::Value;

use super::node::{optional_attr, required_attr, ParseMode};
use crate::error::Result;

/// The network element a measurement block describes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedElement {
    /// `@localDn`
    pub local_dn: String,
    /// `@userLabel`
    pub user_label: String,
    /// `@swVersion`
    pub sw_version: String,
}

impl ManagedElement {
    /// Build from a `managedElement` node
    pub fn from_node(node: Option<&Value>) -> Self {
        Self {
            local_dn: optional_attr(node, "localDn"),
            user_label: optional_attr(node, "userLabel"),
            sw_version: optional_attr(node, "swVersion"),
        }
    }
}

/// The measurement job that produced a block.
///
/// Many files omit `job`; [`Job::Absent`] reads as an empty job id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Job {
    /// No `job` element
    #[default]
    Absent,
    /// A `job` element
    Present {
        /// `@jobId`
        job_id: String,
    },
}

impl Job {
    /// Build from an optional `job` node
    pub fn from_node(node: Option<&Value>) -> Self {
        match node {
            Some(_) => Job::Present {
                job_id: optional_attr(node, "jobId"),
            },
            None => Job::Absent,
        }
    }

    /// Job id, empty when absent
    pub fn job_id(&self) -> &str {
        match self {
            Job::Present { job_id } => job_id,
            Job::Absent => "",
        }
    }
}

/// Granularity period of a measurement block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GranPeriod {
    /// `@duration`, e.g. `PT900S`
    pub duration: Option<String>,
    /// `@endTime`
    pub end_time: Option<String>,
}

impl GranPeriod {
    /// Build from a `granPeriod` node
    pub fn from_node(node: Option<&Value>, path: &str, mode: ParseMode) -> Result<Self> {
        Ok(Self {
            duration: required_attr(node, "duration", path, mode)?,
            end_time: required_attr(node, "endTime", path, mode)?,
        })
    }
}

/// Reporting period of a measurement block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepPeriod {
    /// `@duration`
    pub duration: Option<String>,
}

impl RepPeriod {
    /// Build from a `repPeriod` node
    pub fn from_node(node: Option<&Value>, path: &str, mode: ParseMode) -> Result<Self> {
        Ok(Self {
            duration: required_attr(node, "duration", path, mode)?,
        })
    }
}
