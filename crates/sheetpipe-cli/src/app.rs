//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sheetpipe_data::{
    ConvertOptions, DataEngine, Emission, HeaderBound, OutputFormat, SheetRequest,
};

/// Output format argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON array of records
    Json,
    /// YAML sequence of records
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sheetpipe")]
#[command(
    author,
    version,
    about = "Convert one worksheet of an XLSX document to CSV, JSON or YAML",
    long_about = None
)]
pub struct Cli {
    /// Input XLSX file (reads standard input when omitted or "-")
    pub input: Option<PathBuf>,

    /// Sheet name (defaults to first sheet)
    #[arg(long, default_value = "")]
    pub sheet: String,

    /// Sheet index (defaults to first sheet; zero or negative means unset)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub sheet_index: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Row index to use as header for json and yaml format (defaults to first row)
    #[arg(long, default_value_t = 0)]
    pub header_row_index: usize,

    /// Never fill the last header column in json and yaml records,
    /// matching the output of older releases
    #[arg(long)]
    pub legacy_header_bound: bool,
}

/// Where the workbook comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Settings for one run, fixed once the flags are parsed
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    pub request: SheetRequest,
    pub options: ConvertOptions,
}

impl Cli {
    /// Validate the flags and turn them into a [`Config`]
    pub fn into_config(self) -> Result<Config> {
        // Anything below 1 selects nothing by position
        let index = usize::try_from(self.sheet_index).unwrap_or(0);
        let request = SheetRequest::new(self.sheet, index);
        request.validate()?;

        let format = OutputFormat::from(self.format);
        if !format.is_structured() && self.header_row_index > 0 {
            debug!("--header-row-index only applies to json and yaml output");
        }

        let header_bound = if self.legacy_header_bound {
            HeaderBound::LegacyDropLast
        } else {
            HeaderBound::Shortest
        };

        let input = match self.input {
            Some(path) if path.as_os_str() != "-" => Input::File(path),
            _ => Input::Stdin,
        };

        Ok(Config {
            input,
            request,
            options: ConvertOptions::new(format)
                .with_header_row(self.header_row_index)
                .with_header_bound(header_bound),
        })
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level. Calling this more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and converts the selected worksheet to stdout.
pub fn run_cli() -> Result<Emission> {
    let config = Cli::parse().into_config()?;
    convert_command(&config)
}

/// Execute a conversion, writing to standard output
pub fn convert_command(config: &Config) -> Result<Emission> {
    let bytes = read_input(&config.input)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let emission = DataEngine::convert_xlsx(bytes, &config.request, &config.options, &mut out)?;

    if emission == Emission::ConsumerClosed {
        info!("standard output closed early, output truncated");
    }
    Ok(emission)
}

/// Read the whole workbook into memory
pub fn read_input(input: &Input) -> Result<Vec<u8>> {
    match input {
        Input::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("Failed to read workbook from standard input")?;
            debug!(bytes = bytes.len(), "read workbook from stdin");
            Ok(bytes)
        }
        Input::File(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            debug!(bytes = bytes.len(), path = %path.display(), "read workbook from file");
            Ok(bytes)
        }
    }
}
