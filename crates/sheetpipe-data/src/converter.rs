//! Row transcoder - turns worksheet rows into CSV, JSON or YAML.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{DataError, Result};
use crate::value::{normalize, CellValue};

/// A data row keyed by header field names, in header column order
pub type Record = IndexMap<String, CellValue>;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values, every cell kept as text
    #[default]
    Csv,
    /// Pretty-printed JSON array of objects
    Json,
    /// YAML sequence of mappings
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Whether rows become header-keyed records
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputFormat::Csv)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(DataError::Configuration(format!(
                "invalid format '{}' (expected csv, json or yaml)",
                other
            ))),
        }
    }
}

/// How many columns of a data row are paired with header fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderBound {
    /// Up to the shorter of the row and the header
    #[default]
    Shortest,
    /// As `Shortest`, but the last header column never receives data.
    /// Kept for output parity with older releases.
    LegacyDropLast,
}

/// Options for row transcoding
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Target format
    pub format: OutputFormat,

    /// Zero-based row whose cells become field names (structured formats only)
    pub header_row_index: usize,

    /// Column bound for record building
    pub header_bound: HeaderBound,
}

impl ConvertOptions {
    /// Options for the given format with the first row as header
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_header_row(mut self, index: usize) -> Self {
        self.header_row_index = index;
        self
    }

    pub fn with_header_bound(mut self, bound: HeaderBound) -> Self {
        self.header_bound = bound;
        self
    }
}

/// How emission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Everything was written
    Complete,
    /// The reader went away (broken pipe); the rest was dropped
    ConsumerClosed,
}

/// Converts a worksheet's rows to the requested output format
pub struct RowTranscoder;

impl RowTranscoder {
    /// Transcode `rows` and write them to `out`.
    ///
    /// An empty row sequence writes nothing in any format. A broken pipe on
    /// `out` ends emission with [`Emission::ConsumerClosed`]; any other write
    /// failure is an error.
    pub fn convert<W: Write>(
        rows: Vec<Vec<String>>,
        options: &ConvertOptions,
        out: &mut W,
    ) -> Result<Emission> {
        if rows.is_empty() {
            debug!("worksheet has no rows, nothing to write");
            return Ok(Emission::Complete);
        }

        let emitted = match options.format {
            OutputFormat::Csv => Self::write_delimited(rows, out),
            OutputFormat::Json | OutputFormat::Yaml => {
                let records = Self::build_records(&rows, options)?;
                Self::write_structured(&records, options.format, out)
            }
        };

        match emitted {
            Err(e) if e.is_broken_pipe() => {
                debug!("output closed by consumer, stopping");
                Ok(Emission::ConsumerClosed)
            }
            other => other.map(|_| Emission::Complete),
        }
    }

    /// Normalize every cell of every row, dropping rows with no cells.
    pub fn normalize_rows(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        rows.into_iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.iter().map(|cell| normalize(cell)).collect())
            .collect()
    }

    /// Build one record per row after the header row.
    pub fn build_records(rows: &[Vec<String>], options: &ConvertOptions) -> Result<Vec<Record>> {
        let header_index = options.header_row_index;
        let header: Vec<String> = rows
            .get(header_index)
            .ok_or_else(|| {
                DataError::Configuration(format!(
                    "header row index {} out of range (sheet has {} rows)",
                    header_index,
                    rows.len()
                ))
            })?
            .iter()
            .map(|cell| normalize(cell))
            .collect();

        let field_limit = match options.header_bound {
            HeaderBound::Shortest => header.len(),
            HeaderBound::LegacyDropLast => header.len().saturating_sub(1),
        };

        let records: Vec<Record> = rows[header_index + 1..]
            .iter()
            .map(|row| {
                let mut record = Record::with_capacity(row.len().min(field_limit));
                for (key, cell) in header.iter().zip(row).take(field_limit) {
                    let value = CellValue::infer(&normalize(cell));
                    trace!(field = %key, kind = value.kind(), "cell inferred");
                    record.insert(key.clone(), value);
                }
                record
            })
            .collect();

        debug!(
            fields = header.len(),
            records = records.len(),
            "records built"
        );
        Ok(records)
    }

    /// Write rows as CSV, one record per non-empty row.
    ///
    /// Each record is encoded on its own and handed to `out` in one write,
    /// so the first failed write is the last write attempted.
    pub fn write_delimited<W: Write>(rows: Vec<Vec<String>>, out: &mut W) -> Result<()> {
        let mut written = 0usize;
        for row in Self::normalize_rows(rows) {
            let line = Self::encode_record(&row)?;
            out.write_all(&line).map_err(DataError::Write)?;
            written += 1;
        }
        out.flush().map_err(DataError::Write)?;

        debug!(rows = written, "csv rows written");
        Ok(())
    }

    /// Encode one CSV record including its `\n` terminator.
    ///
    /// A record holding a single empty field comes out as a blank line.
    pub fn encode_record(row: &[String]) -> Result<Vec<u8>> {
        if let [only] = row {
            if only.is_empty() {
                return Ok(b"\n".to_vec());
            }
        }

        let mut encoder = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        encoder.write_record(row)?;
        encoder
            .into_inner()
            .map_err(|e| DataError::Write(e.into_error()))
    }

    /// Serialize all records as one JSON or YAML document.
    ///
    /// The document is rendered fully before anything reaches `out`.
    pub fn write_structured<W: Write>(
        records: &[Record],
        format: OutputFormat,
        out: &mut W,
    ) -> Result<()> {
        let document = Self::render_structured(records, format)?;
        out.write_all(&document).map_err(DataError::Write)?;
        out.flush().map_err(DataError::Write)?;
        Ok(())
    }

    /// Render records to bytes, ending in exactly one newline.
    pub fn render_structured(records: &[Record], format: OutputFormat) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut buf, records)?;
                buf.push(b'\n');
            }
            OutputFormat::Yaml => {
                serde_yaml::to_writer(&mut buf, records)?;
                if !buf.ends_with(b"\n") {
                    buf.push(b'\n');
                }
            }
            OutputFormat::Csv => {
                return Err(DataError::Configuration(
                    "csv is not a structured format".to_string(),
                ))
            }
        }
        Ok(buf)
    }
}
