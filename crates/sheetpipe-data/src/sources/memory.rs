//! In-memory worksheet source.

use crate::error::{DataError, Result};
use crate::sources::DataSource;

/// Named grids of text held in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a worksheet
    pub fn with_sheet<R, C>(mut self, name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.push((name.into(), rows));
        self
    }
}

impl DataSource for MemorySource {
    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| DataError::SheetNotFound {
                sheet: sheet.to_string(),
                available: self
                    .sheets
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
