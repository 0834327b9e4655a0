// 💾 JSON Output
// Pretty-printed, 2-space indent, UTF-8 kept as-is

use crate::card::ManaboxCard;
use crate::parser::import_from_csv;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `records` as one JSON array, overwriting `path`.
///
/// Field order follows the record types; non-ASCII text is written
/// unescaped. Any filesystem error is returned as-is with the path
/// attached.
pub fn save_to_json<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write plain cards, no Scryfall data
pub fn export_to_json(cards: &[ManaboxCard], path: &Path) -> Result<()> {
    save_to_json(cards, path)
}

/// Convert a ManaBox CSV straight to JSON without any lookups.
///
/// Returns the number of cards written.
pub fn csv_to_json(csv_path: &Path, json_path: &Path) -> Result<usize> {
    let cards = import_from_csv(csv_path)?;
    export_to_json(&cards, json_path)?;
    Ok(cards.len())
}

// ============================================================================
// TESTS
// ============================================================================
