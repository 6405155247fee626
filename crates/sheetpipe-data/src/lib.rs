//! # sheetpipe-data
//!
//! Worksheet selection and transcoding for sheetpipe - read one worksheet of
//! a spreadsheet and emit it as CSV, JSON or YAML.
//!
//! ## Features
//!
//! - **Excel Support**: Read `.xlsx` documents from memory using `calamine`
//! - **Sheet Selection**: By name, by position, or the first sheet
//! - **Type Inference**: Integer, float, boolean or string per cell for
//!   structured output
//! - **Broken Pipe Tolerance**: A closed output stream ends emission quietly
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetpipe_data::{ConvertOptions, DataEngine, ExcelSource, OutputFormat, SheetRequest};
//!
//! let mut source = ExcelSource::from_reader(std::io::stdin())?;
//! let options = ConvertOptions::new(OutputFormat::Json);
//! DataEngine::convert(&mut source, &SheetRequest::default(), &options, &mut std::io::stdout())?;
//! ```

pub mod converter;
pub mod error;
pub mod selector;
pub mod sources;
pub mod value;

use std::io::Write;

use tracing::info;

// Re-exports
pub use converter::{ConvertOptions, Emission, HeaderBound, OutputFormat, Record, RowTranscoder};
pub use error::{DataError, Result};
pub use selector::{select_sheet, SheetRequest};
pub use sources::{DataSource, ExcelSource, MemorySource};
pub use value::{infer, normalize, CellValue};

/// Drives one conversion: select a sheet, read it, transcode it
pub struct DataEngine;

impl DataEngine {
    /// Convert one worksheet of `source` and write it to `out`
    ///
    /// # Arguments
    /// * `source` - Document to read from
    /// * `request` - Which worksheet to convert
    /// * `options` - Output format and header handling
    /// * `out` - Destination stream
    ///
    /// # Returns
    /// Whether all output was written or the consumer closed the stream early
    pub fn convert<S, W>(
        source: &mut S,
        request: &SheetRequest,
        options: &ConvertOptions,
        out: &mut W,
    ) -> Result<Emission>
    where
        S: DataSource + ?Sized,
        W: Write,
    {
        request.validate()?;

        let sheets = source.list_sheets()?;
        let sheet = select_sheet(&sheets, request)?;
        let rows = source.read_rows(&sheet)?;

        info!(
            sheet = %sheet,
            rows = rows.len(),
            format = %options.format,
            "converting worksheet"
        );
        RowTranscoder::convert(rows, options, out)
    }

    /// Convert one worksheet of an XLSX document held in memory
    pub fn convert_xlsx<W: Write>(
        bytes: Vec<u8>,
        request: &SheetRequest,
        options: &ConvertOptions,
        out: &mut W,
    ) -> Result<Emission> {
        request.validate()?;
        let mut source = ExcelSource::from_bytes(bytes)?;
        Self::convert(&mut source, request, options, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> MemorySource {
        MemorySource::new()
            .with_sheet(
                "People",
                vec![vec!["name", "age"], vec!["Alice", "30"], vec!["Bob", "x"]],
            )
            .with_sheet("Totals", vec![vec!["sum"], vec!["2"]])
    }

    #[test]
    fn test_convert_default_sheet() {
        let mut out = Vec::new();
        let emission = DataEngine::convert(
            &mut people(),
            &SheetRequest::default(),
            &ConvertOptions::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(emission, Emission::Complete);
        assert_eq!(String::from_utf8(out).unwrap(), "name,age\nAlice,30\nBob,x\n");
    }

    #[test]
    fn test_convert_by_index_to_json() {
        let mut out = Vec::new();
        DataEngine::convert(
            &mut people(),
            &SheetRequest::by_index(1),
            &ConvertOptions::new(OutputFormat::Json),
            &mut out,
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "sum": 2 }]));
    }

    #[test]
    fn test_convert_missing_sheet_writes_nothing() {
        let mut out = Vec::new();
        let err = DataEngine::convert(
            &mut people(),
            &SheetRequest::by_name("Nope"),
            &ConvertOptions::default(),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, DataError::SheetNotFound { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_convert_conflicting_request() {
        let mut out = Vec::new();
        let err = DataEngine::convert(
            &mut people(),
            &SheetRequest::new("People", 1),
            &ConvertOptions::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Configuration(_)));
    }

    #[test]
    fn test_convert_xlsx_conflict_checked_before_parsing() {
        // Garbage bytes would be a WorkbookOpen error; the flag conflict wins
        let mut out = Vec::new();
        let err = DataEngine::convert_xlsx(
            b"garbage".to_vec(),
            &SheetRequest::new("People", 2),
            &ConvertOptions::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Configuration(_)));
    }

    #[test]
    fn test_convert_no_sheets() {
        let mut out = Vec::new();
        let err = DataEngine::convert(
            &mut MemorySource::new(),
            &SheetRequest::default(),
            &ConvertOptions::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::NoWorksheet));
    }
}
