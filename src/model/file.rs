//! The measCollecFile document and its flattening into records

use std::fmt;

use serde_json::Value;

use super::header::{FileFooter, FileHeader};
use super::info::{MeasData, MeasInfo};
use super::measurement::MeasValue;
use super::node::{child_path, indexed_path, repeated, required_child, ParseMode};
use crate::documents::parse_mapping;
use crate::error::{Error, FormatError, Result};
use crate::limits::Limits;
use crate::records::{Provenance, Record, RECORD_HEADER};

/// Root element name
pub const ROOT_ELEMENT: &str = "measCollecFile";

/// A parsed measCollecFile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasCollecFile {
    /// Document header
    pub file_header: FileHeader,
    /// Document footer
    pub file_footer: FileFooter,
    /// Measurement data blocks in document order
    pub meas_data: Vec<MeasData>,
}

impl MeasCollecFile {
    /// Parse XML text and build the document model
    pub fn from_xml(xml: &str, mode: ParseMode, limits: &Limits) -> Result<Self> {
        Self::from_mapping(&parse_mapping(xml, limits)?, mode)
    }

    /// Build from the full mapping `{ "measCollecFile": {...} }`
    pub fn from_mapping(mapping: &Value, mode: ParseMode) -> Result<Self> {
        let root = mapping
            .get(ROOT_ELEMENT)
            .ok_or_else(|| FormatError::missing_required(ROOT_ELEMENT))?;
        Self::from_node(root, mode)
    }

    /// Build from the `measCollecFile` node
    pub fn from_node(node: &Value, mode: ParseMode) -> Result<Self> {
        let path = ROOT_ELEMENT;

        let file_header = FileHeader::from_node(
            required_child(node, "fileHeader", path, mode)?,
            &child_path(path, "fileHeader"),
            mode,
        )?;
        let file_footer = FileFooter::from_node(required_child(node, "fileFooter", path, mode)?);

        required_child(node, "measData", path, mode)?;
        let meas_data = repeated(node, "measData", path)?
            .into_iter()
            .enumerate()
            .map(|(i, md)| MeasData::from_node(md, &indexed_path(path, "measData", i), mode))
            .collect::<Result<Vec<_>>>()?;

        let file = Self {
            file_header,
            file_footer,
            meas_data,
        };
        tracing::debug!(
            meas_data = file.meas_data_count(),
            meas_info = file.meas_info_count(),
            meas_values = file.meas_value_count(),
            "built measCollecFile model"
        );
        Ok(file)
    }

    /// Canonical record field names
    pub fn record_header() -> &'static [&'static str] {
        &RECORD_HEADER
    }

    /// Number of measData blocks
    pub fn meas_data_count(&self) -> usize {
        self.meas_data.len()
    }

    /// Number of measInfo blocks across all measData
    pub fn meas_info_count(&self) -> usize {
        self.meas_data.iter().map(|md| md.meas_info.len()).sum()
    }

    /// Number of decoded values, which is the number of records
    pub fn meas_value_count(&self) -> usize {
        self.meas_data.iter().map(MeasData::meas_value_count).sum()
    }

    /// Lazily flatten into records, one per measurement value.
    ///
    /// Stops being useful after the first `Err`; use
    /// [`convert_to_records`](Self::convert_to_records) for all-or-nothing output.
    pub fn records<'a>(
        &'a self,
        provenance: &'a Provenance,
    ) -> impl Iterator<Item = Result<Record>> + 'a {
        self.meas_data.iter().enumerate().flat_map(move |(i, md)| {
            md.meas_info.iter().enumerate().flat_map(move |(j, mi)| {
                mi.meas_values.iter().enumerate().map(move |(k, mv)| {
                    self.record(md, mi, k, mv, provenance).map_err(|err| {
                        let block = indexed_path(ROOT_ELEMENT, "measData", i);
                        Error::from(err.with_path(indexed_path(&block, "measInfo", j)))
                    })
                })
            })
        })
    }

    /// Flatten into the full record sequence, or fail without partial output
    pub fn convert_to_records(&self, provenance: &Provenance) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(self.meas_value_count());
        for record in self.records(provenance) {
            records.push(record?);
        }
        Ok(records)
    }

    fn record(
        &self,
        md: &MeasData,
        mi: &MeasInfo,
        index: usize,
        mv: &MeasValue,
        provenance: &Provenance,
    ) -> std::result::Result<Record, FormatError> {
        let meas_type = mi
            .meas_type_for(index)
            .ok_or_else(|| FormatError::pairing(&mi.meas_info_id, mi.meas_values.len()))?;
        let value = mv.as_integer().ok_or_else(|| {
            FormatError::coercion(&mv.meas_obj_ldn, &meas_type.name, mv.value.as_str())
        })?;

        let header = &self.file_header;
        let me = &md.managed_element;

        Ok(Record {
            fh_file_format_version: header.file_format_version.clone(),
            fh_vendor_name: header.vendor_name.clone(),
            fh_dn_prefix: header.dn_prefix.clone(),
            fh_fs_local_dn: header.file_sender.local_dn.clone(),
            fh_fs_element_type: header.file_sender.element_type.clone(),
            fh_mc_begin_time: header.meas_collect.begin_time.clone(),
            ff_mc_end_time: self.file_footer.meas_collect.end_time.clone(),
            md_me_local_dn: me.local_dn.clone(),
            md_me_user_label: me.user_label.clone(),
            md_me_sw_version: me.sw_version.clone(),
            md_mi_meas_info_id: mi.meas_info_id.clone(),
            md_mi_job_jobid: mi.job.job_id().to_string(),
            md_mi_gp_duration: mi.gran_period.duration.clone(),
            md_mi_gp_end_time: mi.gran_period.end_time.clone(),
            md_mi_rp_duration: mi.rep_period.duration.clone(),
            md_mi_meas_obj_ldn: mv.meas_obj_ldn.clone(),
            md_mi_meas_name: meas_type.name.clone(),
            md_mi_meas_value: value,
            md_mi_meas_p: mv.p.clone(),
            md_mi_meas_suspect: mv.suspect.clone(),
            input_file: provenance.input_file.clone(),
            input_date_time: provenance.input_date_time.clone(),
            transformed_file: provenance.transformed_file.clone(),
        })
    }
}

impl fmt::Display for MeasCollecFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.file_header;
        writeln!(f, "measCollecFile")?;
        writeln!(
            f,
            "  fileFormatVersion: {}",
            header.file_format_version.as_deref().unwrap_or("<missing>")
        )?;
        writeln!(f, "  vendorName: {}", header.vendor_name)?;
        writeln!(f, "  dnPrefix: {}", header.dn_prefix)?;
        writeln!(
            f,
            "  fileSender: {} ({})",
            header.file_sender.local_dn, header.file_sender.element_type
        )?;
        writeln!(
            f,
            "  collection: {} .. {}",
            header.meas_collect.begin_time, self.file_footer.meas_collect.end_time
        )?;

        for (i, md) in self.meas_data.iter().enumerate() {
            writeln!(f, "  measData[{}]: {}", i, md.managed_element.local_dn)?;
            for mi in &md.meas_info {
                writeln!(
                    f,
                    "    measInfo {}: {} type(s), {} value(s), granPeriod {}",
                    mi.meas_info_id,
                    mi.meas_types.len(),
                    mi.meas_values.len(),
                    mi.gran_period.duration.as_deref().unwrap_or("<missing>")
                )?;
            }
        }

        write!(
            f,
            "  totals: {} measData, {} measInfo, {} value(s)",
            self.meas_data_count(),
            self.meas_info_count(),
            self.meas_value_count()
        )
    }
}
