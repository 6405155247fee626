//! Worksheet selection.

use tracing::{debug, warn};

use crate::error::{DataError, Result};

/// Which worksheet the user asked for
///
/// An empty name and an index of 0 both mean "not requested", so the default
/// request resolves to the first worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRequest {
    /// Worksheet name; empty when unset
    pub name: String,
    /// Zero-based worksheet position; 0 when unset
    pub index: usize,
}

impl SheetRequest {
    /// Create a request from raw flag values
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Request a worksheet by name
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }

    /// Request a worksheet by position
    pub fn by_index(index: usize) -> Self {
        Self::new(String::new(), index)
    }

    /// Reject a request that names a sheet and also gives a positive index.
    pub fn validate(&self) -> Result<()> {
        if !self.name.is_empty() && self.index > 0 {
            return Err(DataError::Configuration(
                "cannot specify both sheet and sheet-index".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve exactly one worksheet name.
///
/// A requested name is returned as-is; whether it exists is checked when its
/// rows are read. An index outside `1..sheets.len()` falls back to the first
/// sheet.
pub fn select_sheet(sheets: &[String], request: &SheetRequest) -> Result<String> {
    request.validate()?;

    if !request.name.is_empty() {
        debug!(sheet = %request.name, "sheet selected by name");
        return Ok(request.name.clone());
    }

    if request.index > 0 {
        if let Some(name) = sheets.get(request.index) {
            debug!(sheet = %name, index = request.index, "sheet selected by index");
            return Ok(name.clone());
        }
        warn!(
            index = request.index,
            sheets = sheets.len(),
            "sheet index out of range, using first sheet"
        );
    }

    let first = sheets.first().ok_or(DataError::NoWorksheet)?;
    debug!(sheet = %first, "defaulting to first sheet");
    Ok(first.clone())
}
