//! Measurement-info blocks and per-element measurement data

use serde_json::Value;

use super::element::{GranPeriod, Job, ManagedElement, RepPeriod};
use super::measurement::{paired_type, MeasType, MeasValue};
use super::node::{child_path, indexed_path, optional_attr, repeated, required_child, ParseMode};
use crate::error::Result;

/// One reporting window: declared measurement types and the sampled values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasInfo {
    /// `@measInfoId`
    pub meas_info_id: String,
    /// Producing job
    pub job: Job,
    /// Granularity period
    pub gran_period: GranPeriod,
    /// Reporting period
    pub rep_period: RepPeriod,
    /// Types in positional order
    pub meas_types: Vec<MeasType>,
    /// Values in document order
    pub meas_values: Vec<MeasValue>,
}

impl MeasInfo {
    /// Build from a `measInfo` node
    pub fn from_node(node: &Value, path: &str, mode: ParseMode) -> Result<Self> {
        let gran_period = GranPeriod::from_node(
            required_child(node, "granPeriod", path, mode)?,
            &child_path(path, "granPeriod"),
            mode,
        )?;
        let rep_period = RepPeriod::from_node(
            required_child(node, "repPeriod", path, mode)?,
            &child_path(path, "repPeriod"),
            mode,
        )?;

        Ok(Self {
            meas_info_id: optional_attr(Some(node), "measInfoId"),
            job: Job::from_node(node.get("job")),
            gran_period,
            rep_period,
            meas_types: MeasType::decode_all(node, path)?,
            meas_values: MeasValue::decode_all(node, path)?,
        })
    }

    /// Type paired with the value at `index`, `None` when no types are declared
    pub fn meas_type_for(&self, index: usize) -> Option<&MeasType> {
        paired_type(&self.meas_types, index)
    }
}

/// One managed element's measurement data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasData {
    /// The measured network element
    pub managed_element: ManagedElement,
    /// Measurement-info blocks in document order
    pub meas_info: Vec<MeasInfo>,
}

impl MeasData {
    /// Build from a `measData` node
    pub fn from_node(node: &Value, path: &str, mode: ParseMode) -> Result<Self> {
        required_child(node, "measInfo", path, mode)?;

        let meas_info = repeated(node, "measInfo", path)?
            .into_iter()
            .enumerate()
            .map(|(i, mi)| MeasInfo::from_node(mi, &indexed_path(path, "measInfo", i), mode))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            managed_element: ManagedElement::from_node(node.get("managedElement")),
            meas_info,
        })
    }

    /// Total decoded values across all blocks
    pub fn meas_value_count(&self) -> usize {
        self.meas_info.iter().map(|mi| mi.meas_values.len()).sum()
    }
}
