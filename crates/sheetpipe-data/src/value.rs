//! Cell normalization and value inference.
//!
//! Every cell is normalized before it is emitted. For structured output the
//! normalized text is then reinterpreted as the richest value it parses as,
//! trying integer, float and boolean in that order.

use std::fmt;

use serde::{Serialize, Serializer};

/// A cell value after inference
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Base-10 signed integer
    Int(i64),
    /// Finite floating point number
    Float(f64),
    /// Boolean literal
    Bool(bool),
    /// Anything else, normalized
    String(String),
}

impl CellValue {
    /// Infer the value of an already-normalized cell.
    pub fn infer(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            return CellValue::Int(i);
        }
        if let Some(f) = parse_float(text) {
            return CellValue::Float(f);
        }
        if let Some(b) = parse_bool(text) {
            return CellValue::Bool(b);
        }
        CellValue::String(text.to_string())
    }

    /// Name of the active variant, used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "bool",
            CellValue::String(_) => "string",
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Collapse line breaks to single spaces and trim surrounding whitespace.
///
/// `"\r\n"` is replaced as a unit, so a Windows line break becomes one space,
/// not two.
pub fn normalize(cell: &str) -> String {
    if !cell.contains('\n') {
        return cell.trim().to_string();
    }
    cell.replace("\r\n", " ").replace('\n', " ").trim().to_string()
}

/// Normalize then infer; the path every record value takes.
pub fn infer(cell: &str) -> CellValue {
    CellValue::infer(&normalize(cell))
}

// `str::parse::<f64>` also accepts "NaN" and "inf", which JSON cannot carry
fn parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
