// 🚨 Error Taxonomy
// Fatal import errors + non-fatal lookup errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while importing a ManaBox CSV export.
///
/// Every variant is fatal: the import stops at the first one and no
/// partial card list is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Required columns missing: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// `row` is the line number in the file (header is line 1)
    #[error("Row {row}: {details}")]
    InvalidRowData { row: usize, details: String },

    #[error("Invalid CSV format: {0}")]
    InvalidCsvFormat(String),

    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ImportError {
    /// Line number of the offending row, if the error is row-scoped
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::InvalidRowData { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// A single cell that could not be coerced into its typed field.
///
/// The parser wraps this into [`ImportError::InvalidRowData`] together
/// with the row number.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("missing value for column '{0}'")]
    Missing(&'static str),

    #[error("invalid {column} '{value}': {reason}")]
    Invalid {
        column: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors from a single Scryfall lookup. Never fatal: the pipeline turns
/// them into missing metadata for that one card.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Scryfall returned HTTP {code}")]
    Status { code: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("response was not valid JSON: {0}")]
    Decode(String),
}
