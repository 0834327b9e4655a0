// 🃏 Card Model - one ManaBox CSV row
// Typed record + cell coercion rules

use crate::error::FieldError;
use crate::parser::CsvRow;
use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const COL_NAME: &str = "Name";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_PRICE: &str = "Price";
pub const COL_TOTAL_PRICE: &str = "Total price";
pub const COL_SET_CODE: &str = "Set code";
pub const COL_SET_NAME: &str = "Set name";
pub const COL_COLLECTOR_NUMBER: &str = "Collector number";
pub const COL_FOIL: &str = "Foil";
pub const COL_RARITY: &str = "Rarity";
pub const COL_MANA_BOX_ID: &str = "ManaBox ID";
pub const COL_SCRYFALL_ID: &str = "Scryfall ID";
pub const COL_PURCHASE_PRICE: &str = "Purchase price";
pub const COL_MISPRINT: &str = "Misprint";
pub const COL_ALTERED: &str = "Altered";
pub const COL_CONDITION: &str = "Condition";
pub const COL_LANGUAGE: &str = "Language";
pub const COL_PURCHASE_PRICE_CURRENCY: &str = "Purchase price currency";

/// Columns every export must carry, in ManaBox order
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_NAME,
    COL_QUANTITY,
    COL_SET_CODE,
    COL_SET_NAME,
    COL_COLLECTOR_NUMBER,
    COL_FOIL,
    COL_RARITY,
    COL_MANA_BOX_ID,
    COL_SCRYFALL_ID,
];

pub const DEFAULT_CONDITION: &str = "Near Mint";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_CURRENCY: &str = "USD";

const TRUTHY_TOKENS: [&str; 3] = ["true", "1", "yes"];

// ============================================================================
// MANABOX CARD
// ============================================================================

/// A Magic: The Gathering card line from a ManaBox export.
///
/// Field order here is the field order of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManaboxCard {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub total_price: f64,
    pub set_code: String,
    pub set_name: String,
    pub collector_number: String,
    pub foil: bool,
    pub rarity: String,

    /// Batch-local id assigned by ManaBox (carried through, never queried)
    pub mana_box_id: String,

    /// Catalog id used for the Scryfall lookup; may be empty
    pub scryfall_id: String,

    /// None = column absent or empty, distinct from a price of 0.0
    pub purchase_price: Option<f64>,

    pub misprint: bool,
    pub altered: bool,
    pub condition: String,
    pub language: String,
    pub purchase_price_currency: String,
}

impl ManaboxCard {
    /// Build a card from one CSV row, coercing every cell to its type.
    ///
    /// Required columns must have a cell in the row (it may be empty).
    /// Optional columns fall back to their defaults when absent or empty.
    pub fn from_csv_row(row: &CsvRow<'_>) -> Result<Self, FieldError> {
        let quantity_raw = required(row, COL_QUANTITY)?;

        Ok(ManaboxCard {
            name: required(row, COL_NAME)?.to_string(),
            quantity: parse_quantity(quantity_raw)?,
            price: parse_optional_price(row, COL_PRICE)?.unwrap_or(0.0),
            total_price: parse_optional_price(row, COL_TOTAL_PRICE)?.unwrap_or(0.0),
            set_code: required(row, COL_SET_CODE)?.to_string(),
            set_name: required(row, COL_SET_NAME)?.to_string(),
            collector_number: required(row, COL_COLLECTOR_NUMBER)?.to_string(),
            foil: parse_flag(required(row, COL_FOIL)?),
            rarity: required(row, COL_RARITY)?.to_string(),
            mana_box_id: required(row, COL_MANA_BOX_ID)?.to_string(),
            scryfall_id: required(row, COL_SCRYFALL_ID)?.to_string(),
            purchase_price: parse_optional_price(row, COL_PURCHASE_PRICE)?,
            misprint: row.get(COL_MISPRINT).map(parse_flag).unwrap_or(false),
            altered: row.get(COL_ALTERED).map(parse_flag).unwrap_or(false),
            condition: text_or_default(row, COL_CONDITION, DEFAULT_CONDITION),
            language: text_or_default(row, COL_LANGUAGE, DEFAULT_LANGUAGE),
            purchase_price_currency: text_or_default(
                row,
                COL_PURCHASE_PRICE_CURRENCY,
                DEFAULT_CURRENCY,
            ),
        })
    }

    /// True when the card carries a catalog id worth looking up
    pub fn has_scryfall_id(&self) -> bool {
        !self.scryfall_id.trim().is_empty()
    }

    /// Serialize this single card (non-ASCII left unescaped)
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

// ============================================================================
// CELL COERCION
// ============================================================================

/// Truthy tokens are `true`, `1` and `yes` in any case; everything else is false
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_TOKENS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

fn required<'a>(row: &CsvRow<'a>, column: &'static str) -> Result<&'a str, FieldError> {
    row.get(column).ok_or(FieldError::Missing(column))
}

fn parse_quantity(raw: &str) -> Result<u32, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(0);
    }

    value.parse::<u32>().map_err(|e| FieldError::Invalid {
        column: COL_QUANTITY,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_optional_price(row: &CsvRow<'_>, column: &'static str) -> Result<Option<f64>, FieldError> {
    let raw = match row.get(column) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    let invalid = |reason: String| FieldError::Invalid {
        column,
        value: raw.to_string(),
        reason,
    };

    let value = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid("not a finite number".to_string()));
    }

    Ok(Some(value))
}

fn text_or_default(row: &CsvRow<'_>, column: &str, default: &str) -> String {
    match row.get(column) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
