//! Flat records
//!
//! A [`Record`] is one measurement value with the full context needed to
//! read it outside the XML file. Its fields are declared in the order of
//! [`RECORD_HEADER`], which every writer uses as its column order.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical field order of a flat record
pub const RECORD_HEADER: [&str; 23] = [
    "fh_file_format_version",
    "fh_vendor_name",
    "fh_dn_prefix",
    "fh_fs_local_dn",
    "fh_fs_element_type",
    "fh_mc_begin_time",
    "ff_mc_end_time",
    "md_me_local_dn",
    "md_me_user_label",
    "md_me_sw_version",
    "md_mi_meas_info_id",
    "md_mi_job_jobid",
    "md_mi_gp_duration",
    "md_mi_gp_end_time",
    "md_mi_rp_duration",
    "md_mi_meas_obj_ldn",
    "md_mi_meas_name",
    "md_mi_meas_value",
    "md_mi_meas_p",
    "md_mi_meas_suspect",
    "input_file",
    "input_date_time",
    "transformed_file",
];

/// Canonical field names, usable before any file is parsed
pub fn record_header() -> &'static [&'static str] {
    &RECORD_HEADER
}

/// Format of the ingestion timestamp
pub const INPUT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Caller-supplied provenance copied into every record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// Locator of the source file
    pub input_file: String,
    /// Ingestion timestamp
    pub input_date_time: String,
    /// Locator of the transformed output
    pub transformed_file: String,
}

impl Provenance {
    /// Create provenance from explicit values
    pub fn new(
        input_file: impl Into<String>,
        input_date_time: impl Into<String>,
        transformed_file: impl Into<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            input_date_time: input_date_time.into(),
            transformed_file: transformed_file.into(),
        }
    }

    /// Create provenance stamped with the given ingestion time
    pub fn at(
        input_file: impl Into<String>,
        ingested: DateTime<Utc>,
        transformed_file: impl Into<String>,
    ) -> Self {
        Self::new(
            input_file,
            ingested.format(INPUT_DATE_TIME_FORMAT).to_string(),
            transformed_file,
        )
    }
}

/// One flattened measurement value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// `@fileFormatVersion` of fileHeader; absent when missing
    pub fh_file_format_version: Option<String>,
    /// `@vendorName` of fileHeader
    pub fh_vendor_name: String,
    /// `@dnPrefix` of fileHeader
    pub fh_dn_prefix: String,
    /// `@localDn` of fileHeader/fileSender
    pub fh_fs_local_dn: String,
    /// `@elementType` of fileHeader/fileSender
    pub fh_fs_element_type: String,
    /// `@beginTime` of fileHeader/measCollec
    pub fh_mc_begin_time: String,
    /// `@endTime` of fileFooter/measCollec
    pub ff_mc_end_time: String,
    /// `@localDn` of the measData managedElement
    pub md_me_local_dn: String,
    /// `@userLabel` of the managedElement
    pub md_me_user_label: String,
    /// `@swVersion` of the managedElement
    pub md_me_sw_version: String,
    /// `@measInfoId` of the enclosing measInfo
    pub md_mi_meas_info_id: String,
    /// `@jobId` of the measInfo job; empty without a job
    pub md_mi_job_jobid: String,
    /// `@duration` of the measInfo granPeriod
    pub md_mi_gp_duration: Option<String>,
    /// `@endTime` of the measInfo granPeriod
    pub md_mi_gp_end_time: Option<String>,
    /// `@duration` of the measInfo repPeriod
    pub md_mi_rp_duration: Option<String>,
    /// `@measObjLdn` of the enclosing measValue
    pub md_mi_meas_obj_ldn: String,
    /// Text of the paired measType (or measTypes token)
    pub md_mi_meas_name: String,
    /// Value token of measResults, or `r` text
    pub md_mi_meas_value: i64,
    /// `@p` of the `r` element, or of measValue in the compact form
    pub md_mi_meas_p: Option<String>,
    /// `suspect` text of the enclosing measValue
    pub md_mi_meas_suspect: Option<String>,
    /// Locator of the input file
    pub input_file: String,
    /// Ingestion time as `%Y-%m-%dT%H:%M:%S.000Z`
    pub input_date_time: String,
    /// Locator of the written output file
    pub transformed_file: String,
}

impl Record {
    /// Field values in [`RECORD_HEADER`] order; `None` for absent fields
    pub fn values(&self) -> Vec<Option<String>> {
        let text = |s: &String| Some(s.clone());
        vec![
            self.fh_file_format_version.clone(),
            text(&self.fh_vendor_name),
            text(&self.fh_dn_prefix),
            text(&self.fh_fs_local_dn),
            text(&self.fh_fs_element_type),
            text(&self.fh_mc_begin_time),
            text(&self.ff_mc_end_time),
            text(&self.md_me_local_dn),
            text(&self.md_me_user_label),
            text(&self.md_me_sw_version),
            text(&self.md_mi_meas_info_id),
            text(&self.md_mi_job_jobid),
            self.md_mi_gp_duration.clone(),
            self.md_mi_gp_end_time.clone(),
            self.md_mi_rp_duration.clone(),
            text(&self.md_mi_meas_obj_ldn),
            text(&self.md_mi_meas_name),
            Some(self.md_mi_meas_value.to_string()),
            self.md_mi_meas_p.clone(),
            self.md_mi_meas_suspect.clone(),
            text(&self.input_file),
            text(&self.input_date_time),
            text(&self.transformed_file),
        ]
    }
}
