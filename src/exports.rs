//! Record writers
//!
//! Flattened records are written either as JSON lines (one object per line,
//! keys in header order) or as `|`-delimited text with a header row.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::records::{record_header, Record};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Line-delimited JSON
    #[default]
    Json,
    /// `|`-delimited text with a header row
    Csv,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Destination prefix the transformed file is stored under
    pub fn destination_prefix(self) -> &'static str {
        match self {
            OutputFormat::Json => "raw_transform_json",
            OutputFormat::Csv => "raw_transform_csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(OutputFormat::Json),
            "CSV" => Ok(OutputFormat::Csv),
            other => Err(Error::Config(format!(
                "unknown output format '{}'. Use: JSON, CSV",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("JSON"),
            OutputFormat::Csv => f.write_str("CSV"),
        }
    }
}

/// Field delimiter of the delimited-text output
pub const CSV_DELIMITER: u8 = b'|';

/// Write records as JSON lines
pub fn write_json_lines<W: Write>(records: &[Record], mut writer: W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as `|`-delimited text, header row first
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(record_header())?;
    for record in records {
        csv.write_record(record.values().iter().map(|v| v.as_deref().unwrap_or("")))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write records in the selected format
pub fn write_records<W: Write>(format: OutputFormat, records: &[Record], writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json_lines(records, writer),
        OutputFormat::Csv => write_csv(records, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(value: i64, p: Option<&str>) -> Record {
        Record {
            fh_file_format_version: Some("32.435 V10.0".to_string()),
            fh_vendor_name: "Acme".to_string(),
            md_me_local_dn: "ME=1".to_string(),
            md_mi_meas_obj_ldn: "Cell=1".to_string(),
            md_mi_meas_name: "pmA".to_string(),
            md_mi_meas_value: value,
            md_mi_meas_p: p.map(str::to_string),
            input_file: "in.xml".to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" CSV ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!("xml".parse::<OutputFormat>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_output_format_naming() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Csv.destination_prefix(), "raw_transform_csv");
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
    }

    #[test]
    fn test_write_json_lines() {
        let mut out = Vec::new();
        write_json_lines(&[record(10, Some("1")), record(20, None)], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"fh_file_format_version\":\"32.435 V10.0\","));
        assert!(lines[0].contains("\"md_mi_meas_value\":10,"));
        assert!(lines[1].contains("\"md_mi_meas_p\":null"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&[record(10, Some("1"))], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), record_header().join("|"));

        let row: Vec<_> = lines.next().unwrap().split('|').collect();
        assert_eq!(row.len(), 23);
        assert_eq!(row[0], "32.435 V10.0");
        assert_eq!(row[16], "pmA");
        assert_eq!(row[17], "10");
        assert_eq!(row[18], "1");
        assert_eq!(row[19], "");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_csv_header_only() {
        let mut out = Vec::new();
        write_records(OutputFormat::Csv, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", record_header().join("|")));
    }

    #[test]
    fn test_write_csv_quotes_delimiter() {
        let mut rec = record(1, None);
        rec.md_me_user_label = "a|b".to_string();

        let mut out = Vec::new();
        write_csv(&[rec], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"a|b\""));
    }
}
