//! Worksheet sources.
//!
//! This module contains adapters that expose a document as an ordered list of
//! worksheets, each an ordered sequence of text rows.

pub mod excel;
pub mod memory;

pub use excel::ExcelSource;
pub use memory::MemorySource;

use crate::error::Result;

/// Trait for documents that hold one or more worksheets of text cells
pub trait DataSource {
    /// List worksheet names in document order
    fn list_sheets(&self) -> Result<Vec<String>>;

    /// Read every row of a worksheet
    ///
    /// # Arguments
    /// * `sheet` - Worksheet name
    ///
    /// # Returns
    /// Rows in sheet order, each a vector of cell texts. Rows may differ in
    /// length.
    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>>;

    /// Get the default sheet name
    fn default_sheet(&self) -> Option<String> {
        self.list_sheets().ok()?.into_iter().next()
    }
}
