//! Command-line interface for meascollec

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use meascollec::converters::{ConverterConfig, DictConverter};
#[cfg(feature = "cli")]
use meascollec::documents::parse_mapping_with;
#[cfg(feature = "cli")]
use meascollec::exports::OutputFormat;
#[cfg(feature = "cli")]
use meascollec::limits::Limits;
#[cfg(feature = "cli")]
use meascollec::loaders::Loader;
#[cfg(feature = "cli")]
use meascollec::pipeline::{TransformConfig, Transformer};
#[cfg(feature = "cli")]
use meascollec::{record_header, MeasCollecFile, ParseMode};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "meascollec")]
#[command(author, version, about = "3GPP measCollecFile flattening tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten a measCollecFile into JSON lines or delimited text
    Transform {
        /// Path to the measCollecFile XML
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format: json, csv
        #[arg(short, long, env = "OUTPUT_FORMAT", default_value = "json")]
        format: String,

        /// Directory the transformed file is written under
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Locator recorded as the input file
        #[arg(long)]
        source_uri: Option<String>,

        /// Base locator recorded for the transformed file
        #[arg(long)]
        destination_uri: Option<String>,

        /// Reject files with missing required keys
        #[arg(long)]
        strict: bool,

        /// Input limits: default, strict, permissive
        #[arg(long, default_value = "default")]
        limits: String,
    },

    /// Print the canonical record header
    Header,

    /// Summarize a measCollecFile
    Inspect {
        /// Path to the measCollecFile XML
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reject files with missing required keys
        #[arg(long)]
        strict: bool,

        /// Input limits: default, strict, permissive
        #[arg(long, default_value = "default")]
        limits: String,
    },

    /// Print the nested mapping a measCollecFile is transcoded to
    Mapping {
        /// Path to the measCollecFile XML
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Always decode this tag as a sequence (repeatable)
        #[arg(long = "force-list", value_name = "TAG")]
        force_list: Vec<String>,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Input limits: default, strict, permissive
        #[arg(long, default_value = "default")]
        limits: String,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform {
            file,
            format,
            output_dir,
            source_uri,
            destination_uri,
            strict,
            limits,
        } => cmd_transform(file, format, output_dir, source_uri, destination_uri, strict, limits),
        Commands::Header => {
            println!("{}", record_header().join("|"));
            Ok(())
        }
        Commands::Inspect {
            file,
            strict,
            limits,
        } => cmd_inspect(file, strict, limits),
        Commands::Mapping {
            file,
            force_list,
            pretty,
            limits,
        } => cmd_mapping(file, force_list, pretty, limits),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn parse_mode(strict: bool) -> ParseMode {
    if strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    }
}

#[cfg(feature = "cli")]
fn cmd_transform(
    file: PathBuf,
    format: String,
    output_dir: PathBuf,
    source_uri: Option<String>,
    destination_uri: Option<String>,
    strict: bool,
    limits: String,
) -> meascollec::Result<()> {
    let mut config = TransformConfig::new()
        .with_format(format.parse::<OutputFormat>()?)
        .with_output_dir(output_dir)
        .with_mode(parse_mode(strict))
        .with_limits(limits.parse::<Limits>()?);

    if let Some(uri) = source_uri {
        config = config.with_source_uri(&uri)?;
    }
    if let Some(uri) = destination_uri {
        config = config.with_destination_uri(&uri)?;
    }

    let summary = Transformer::new(config).run(&file)?;
    println!("{}", summary.message);
    println!("{} record(s) written to {}", summary.records, summary.output_path.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(file: PathBuf, strict: bool, limits: String) -> meascollec::Result<()> {
    let loader = Loader::new().with_limits(limits.parse::<Limits>()?);
    let xml = loader.load_file(&file)?;
    let document = MeasCollecFile::from_xml(&xml, parse_mode(strict), loader.limits())?;

    println!("meascollec v{}", meascollec::VERSION);
    println!();
    println!("{}", document);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_mapping(
    file: PathBuf,
    force_list: Vec<String>,
    pretty: bool,
    limits: String,
) -> meascollec::Result<()> {
    let loader = Loader::new().with_limits(limits.parse::<Limits>()?);
    let xml = loader.load_file(&file)?;

    let config = force_list
        .into_iter()
        .fold(ConverterConfig::new(), |config, tag| config.with_force_list(tag));
    let mapping = parse_mapping_with(&xml, loader.limits(), &DictConverter::with_config(config))?;

    let output = if pretty {
        serde_json::to_string_pretty(&mapping)?
    } else {
        serde_json::to_string(&mapping)?
    };
    println!("{}", output);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
