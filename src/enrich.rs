// 🔗 Enrichment Pipeline
// Sequential lookups, fixed pause between requests, input order preserved

use crate::card::ManaboxCard;
use crate::error::ImportError;
use crate::parser::import_from_csv;
use crate::scryfall::CardLookup;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A card plus whatever Scryfall returned for it.
///
/// Serializes as the card's own fields followed by `scryfall_data`,
/// which is `null` when there was no catalog id or the lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCard {
    #[serde(flatten)]
    pub card: ManaboxCard,
    pub scryfall_data: Option<Value>,
}

impl EnrichedCard {
    pub fn has_metadata(&self) -> bool {
        self.scryfall_data.is_some()
    }
}

/// Look up one card. Lookup failures are logged and become `None`.
pub fn enrich_card(card: ManaboxCard, lookup: &dyn CardLookup) -> EnrichedCard {
    if !card.has_scryfall_id() {
        debug!("{} has no Scryfall ID, skipping lookup", card.name);
        return EnrichedCard {
            card,
            scryfall_data: None,
        };
    }

    let scryfall_data = match lookup.fetch_card(&card.scryfall_id) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("Failed to fetch Scryfall data for {}: {}", card.name, e);
            None
        }
    };

    EnrichedCard {
        card,
        scryfall_data,
    }
}

/// Enrich every card in order, sleeping `delay` between lookups.
pub fn enrich_cards(
    cards: Vec<ManaboxCard>,
    lookup: &dyn CardLookup,
    delay: Duration,
) -> Vec<EnrichedCard> {
    enrich_cards_paced(cards, lookup, delay, std::thread::sleep)
}

/// Same as [`enrich_cards`] with the pause supplied by the caller.
///
/// `pause` runs once between consecutive cards: never after the last
/// card, and never when `delay` is zero.
pub fn enrich_cards_paced<F>(
    cards: Vec<ManaboxCard>,
    lookup: &dyn CardLookup,
    delay: Duration,
    mut pause: F,
) -> Vec<EnrichedCard>
where
    F: FnMut(Duration),
{
    let total = cards.len();
    info!("Enriching {} unique cards with Scryfall data...", total);

    let mut enriched = Vec::with_capacity(total);

    for (i, card) in cards.into_iter().enumerate() {
        let position = i + 1;
        info!("Processing card {}/{}: {}", position, total, card.name);

        enriched.push(enrich_card(card, lookup));

        if position < total && !delay.is_zero() {
            pause(delay);
        }
    }

    let found = enriched.iter().filter(|c| c.has_metadata()).count();
    info!("Completed enriching {} cards ({} with Scryfall data)", total, found);

    enriched
}

/// Import a ManaBox CSV and enrich it in one go
pub fn enrich_csv_with_scryfall(
    csv_path: &Path,
    lookup: &dyn CardLookup,
    delay: Duration,
) -> Result<Vec<EnrichedCard>, ImportError> {
    let cards = import_from_csv(csv_path)?;
    Ok(enrich_cards(cards, lookup, delay))
}

// ============================================================================
// TESTS
// ============================================================================
