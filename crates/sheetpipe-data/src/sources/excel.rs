//! Excel/XLSX worksheet source using calamine.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, ExcelDateTime, Range, Reader, Xlsx, XlsxError};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::sources::DataSource;

/// XLSX workbook held in memory
pub struct ExcelSource {
    /// Parsed workbook over the raw document bytes
    workbook: Xlsx<Cursor<Vec<u8>>>,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook from the raw bytes of an XLSX document
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let size = bytes.len();
        let workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e: XlsxError| DataError::WorkbookOpen(e.to_string()))?;

        let sheet_names = workbook.sheet_names().to_vec();
        debug!(bytes = size, sheets = sheet_names.len(), "workbook opened");

        Ok(Self {
            workbook,
            sheet_names,
        })
    }

    /// Read a whole document from `reader` (typically stdin) and open it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    /// Open a workbook from a file path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Convert a calamine cell to a string
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                // Whole numbers print without a fractional part
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::Error(e) => format!("#ERROR: {:?}", e),
            Data::DateTime(dt) => Self::datetime_to_string(dt),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
        }
    }

    /// Date cells as ISO 8601 text; durations keep the raw serial value
    fn datetime_to_string(dt: &ExcelDateTime) -> String {
        if !dt.is_datetime() {
            return dt.to_string();
        }
        let Some(value) = dt.as_datetime() else {
            return dt.to_string();
        };

        let pattern = if dt.as_f64().fract() == 0.0 {
            "%Y-%m-%d"
        } else {
            "%Y-%m-%d %H:%M:%S"
        };
        value.format(pattern).to_string()
    }

    /// Lay out a used range at absolute sheet coordinates.
    ///
    /// Rows above and columns left of the used range come out as empty rows
    /// and empty cells; trailing empty cells of each row are dropped.
    fn extract_rows(range: &Range<Data>) -> Vec<Vec<String>> {
        let Some((start_row, start_col)) = range.start() else {
            return Vec::new();
        };

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(start_row as usize + range.height());
        rows.resize_with(start_row as usize, Vec::new);

        for cells in range.rows() {
            let mut row: Vec<String> = std::iter::repeat_with(String::new)
                .take(start_col as usize)
                .chain(cells.iter().map(Self::cell_to_string))
                .collect();
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
            rows.push(row);
        }

        rows
    }
}

impl DataSource for ExcelSource {
    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheet_names.clone())
    }

    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let range = self.workbook.worksheet_range(sheet).map_err(|e| match e {
            XlsxError::WorksheetNotFound(_) => DataError::SheetNotFound {
                sheet: sheet.to_string(),
                available: self.sheet_names.join(", "),
            },
            other => DataError::from(other),
        })?;

        let rows = Self::extract_rows(&range);
        debug!(sheet, rows = rows.len(), "worksheet read");
        Ok(rows)
    }

    fn default_sheet(&self) -> Option<String> {
        self.sheet_names.first().cloned()
    }
}
