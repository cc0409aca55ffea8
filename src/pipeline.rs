//! End-to-end transformation of one measurement file
//!
//! The [`Transformer`] loads a local XML file, builds the document model,
//! flattens it and writes the records to
//! `<output_dir>/<prefix>/<epoch-millis>_<stem>.<ext>`.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::exports::{write_records, OutputFormat};
use crate::limits::Limits;
use crate::loaders::Loader;
use crate::locations::Location;
use crate::model::{MeasCollecFile, ParseMode};
use crate::records::{Provenance, Record};

/// Configuration of a transformation run
#[derive(Debug, Clone)]
pub struct TransformConfig {
    format: OutputFormat,
    output_dir: PathBuf,
    source_uri: Option<Location>,
    destination_uri: Option<Location>,
    mode: ParseMode,
    limits: Limits,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output_dir: PathBuf::from("."),
            source_uri: None,
            destination_uri: None,
            mode: ParseMode::default(),
            limits: Limits::default(),
        }
    }
}

impl TransformConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the local output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Record this locator as the input file instead of the local path
    pub fn with_source_uri(mut self, uri: &str) -> Result<Self> {
        self.source_uri = Some(Location::parse(uri)?);
        Ok(self)
    }

    /// Base locator recorded as the transformed file instead of the output directory
    pub fn with_destination_uri(mut self, uri: &str) -> Result<Self> {
        self.destination_uri = Some(Location::parse(uri)?);
        Ok(self)
    }

    /// Set the parse mode
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the resource limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the parse mode
    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSummary {
    /// Number of records written
    pub records: usize,
    /// Local path of the written file
    pub output_path: PathBuf,
    /// Provenance copied into every record
    pub provenance: Provenance,
    /// Completion message
    pub message: String,
}

/// Runs the load, parse, flatten and write stages
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    /// Create a transformer
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform one file, stamped with the current time
    pub fn run(&self, input: &Path) -> Result<TransformSummary> {
        self.run_at(input, Utc::now())
    }

    /// Transform one file, stamped with the given ingestion time
    pub fn run_at(&self, input: &Path, ingested: DateTime<Utc>) -> Result<TransformSummary> {
        let format = self.config.format;
        let relative = format!(
            "{}/{}",
            format.destination_prefix(),
            output_file_name(input, ingested, format)?
        );
        let output_path = self.config.output_dir.join(&relative);

        let source = match &self.config.source_uri {
            Some(uri) => uri.clone(),
            None => Location::from_path(input),
        };
        let destination = match &self.config.destination_uri {
            Some(uri) => uri.join(&relative)?,
            None => Location::from_path(&output_path),
        };
        let provenance = Provenance::at(source.to_string(), ingested, destination.to_string());

        tracing::info!(input = %input.display(), "loading measurement file");
        let loader = Loader::new().with_limits(self.config.limits.clone());
        let xml = loader.load_file(input)?;

        tracing::info!(mode = ?self.config.mode, "building document model");
        let file = MeasCollecFile::from_xml(&xml, self.config.mode, loader.limits())?;

        let records = file.convert_to_records(&provenance)?;
        tracing::info!(
            records = records.len(),
            meas_info = file.meas_info_count(),
            "flattened measurement file"
        );

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_output(&output_path, format, &records)?;

        let message = format!(
            "{} successfully created from : {}",
            provenance.transformed_file, provenance.input_file
        );
        tracing::info!(output = %output_path.display(), format = %format, "{}", message);

        Ok(TransformSummary {
            records: records.len(),
            output_path,
            provenance,
            message,
        })
    }
}

/// Write records to `<path>.part`, then rename it into place.
///
/// On failure the partial file is removed and `path` is left untouched.
fn write_output(path: &Path, format: OutputFormat, records: &[Record]) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = fs::File::create(&partial)
        .map_err(|e| Error::Resource(format!("cannot create '{}': {}", partial.display(), e)))
        .and_then(|out| write_records(format, records, BufWriter::new(out)))
        .and_then(|()| {
            fs::rename(&partial, path).map_err(|e| {
                Error::Resource(format!("cannot move output to '{}': {}", path.display(), e))
            })
        });

    if written.is_err() {
        if let Err(e) = fs::remove_file(&partial) {
            tracing::debug!(path = %partial.display(), "partial output not removed: {}", e);
        }
    }
    written
}

/// Output file name: `<epoch-millis>_<input-stem>.<ext>`
pub fn output_file_name(
    input: &Path,
    ingested: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Config(format!("no file name in '{}'", input.display())))?;

    Ok(format!(
        "{}_{}.{}",
        ingested.timestamp_millis(),
        stem,
        format.extension()
    ))
}
