// ManaBox Enrich - Core Library
// Exposes all modules for use in the CLI and tests

pub mod card;
pub mod concise;
pub mod enrich;
pub mod error;
pub mod output;
pub mod parser;
pub mod scryfall;

// Re-export commonly used types
pub use card::{ManaboxCard, REQUIRED_COLUMNS};
pub use concise::{create_concise_output, ConciseCard, OutputMode};
pub use enrich::{enrich_card, enrich_cards, enrich_cards_paced, enrich_csv_with_scryfall, EnrichedCard};
pub use error::{FieldError, ImportError, LookupError};
pub use output::{csv_to_json, export_to_json, save_to_json};
pub use parser::{import_from_csv, import_from_reader, CsvRow};
pub use scryfall::{CardLookup, LookupConfig, ScryfallClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
