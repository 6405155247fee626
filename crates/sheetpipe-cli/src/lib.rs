//! sheetpipe CLI - Command-line interface library
//!
//! Reads an XLSX document from standard input (or a file), selects one
//! worksheet and writes it to standard output as CSV, JSON or YAML.
//!
//! # Library Usage
//!
//! ```ignore
//! use sheetpipe_cli::{convert_command, Cli};
//! use clap::Parser;
//!
//! let config = Cli::parse_from(["sheetpipe", "--format", "json"]).into_config()?;
//! convert_command(&config)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # First sheet as CSV
//! sheetpipe < report.xlsx
//!
//! # Named sheet as JSON records, headers on the third row
//! sheetpipe --sheet Sales --format json --header-row-index 2 < report.xlsx
//!
//! # Second sheet as YAML
//! cat report.xlsx | sheetpipe --sheet-index 1 --format yaml
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, init_logging, read_input, run_cli, Cli, Config, Format, Input};
