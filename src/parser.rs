// 🏗️ CSV Import - ManaBox export → Vec<ManaboxCard>
// Header validation + fail-fast row coercion

use crate::card::{ManaboxCard, REQUIRED_COLUMNS};
use crate::error::ImportError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

// ============================================================================
// ROW VIEW
// ============================================================================

/// One data row addressed by column name.
///
/// Cells are looked up through the header index, so column order in the
/// export does not matter. A row shorter than the header simply has no
/// cell for the trailing columns.
pub struct CsvRow<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(columns: &'a HashMap<String, usize>, record: &'a StringRecord) -> Self {
        CsvRow { columns, record }
    }

    /// Raw cell for `column`, or None if the header or the row lacks it
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = *self.columns.get(column)?;
        self.record.get(index)
    }
}

// ============================================================================
// IMPORT
// ============================================================================

/// Import ManaBox cards from a CSV file.
///
/// # Errors
/// * `FileNotFound` - the path does not exist (checked before opening)
/// * `MissingColumns` - the header lacks a required column
/// * `InvalidRowData` - the first row whose cells cannot be coerced
/// * `InvalidCsvFormat` - the file is not readable as CSV
pub fn import_from_csv(path: &Path) -> Result<Vec<ManaboxCard>, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Reading ManaBox export from {}", path.display());
    import_from_reader(file)
}

/// Import ManaBox cards from any reader holding CSV text.
///
/// Aborts on the first bad row; no partial list is ever returned.
pub fn import_from_reader<R: Read>(reader: R) -> Result<Vec<ManaboxCard>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(invalid_format)?.clone();
    let columns = column_index(&headers);
    validate_columns(&columns)?;

    let mut cards = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row_num = idx + 2; // +2 because: 1-indexed + header row
        let record = result.map_err(invalid_format)?;

        let row = CsvRow::new(&columns, &record);
        let card = ManaboxCard::from_csv_row(&row).map_err(|e| ImportError::InvalidRowData {
            row: row_num,
            details: e.to_string(),
        })?;

        cards.push(card);
    }

    debug!("Parsed {} cards", cards.len());
    Ok(cards)
}

/// Map header names to their positions. A repeated header resolves to its
/// last occurrence.
fn column_index(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim_start_matches('\u{feff}').to_string(), i))
        .collect()
}

fn validate_columns(columns: &HashMap<String, usize>) -> Result<(), ImportError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !columns.contains_key(**column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns { missing })
    }
}

fn invalid_format(err: csv::Error) -> ImportError {
    ImportError::InvalidCsvFormat(err.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
