// ✂️ Concise Output - gameplay-only projection of enriched cards

use crate::enrich::EnrichedCard;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scryfall fields copied into concise output, in output order
pub const GAME_MECHANICS_FIELDS: [&str; 9] = [
    "mana_cost",
    "cmc",
    "type_line",
    "oracle_text",
    "power",
    "toughness",
    "colors",
    "color_identity",
    "keywords",
];

const LEGAL: &str = "legal";

/// Which shape the output document takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every card field plus the raw Scryfall document
    Full,
    /// Gameplay fields only
    Concise { flatten_legalities: bool },
}

/// Reduced view of an [`EnrichedCard`].
///
/// Gameplay and legality fields only appear when the card had Scryfall
/// data; a field the document lacks is left out rather than nulled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConciseCard {
    pub name: String,
    pub quantity: u32,
    pub set_name: String,
    pub collector_number: String,
    pub rarity: String,
    pub scryfall_id: String,
    pub mana_box_id: String,

    /// Whitelisted Scryfall fields, keyed by their Scryfall name
    #[serde(flatten)]
    pub mechanics: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legalities: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander_legal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_legal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern_legal: Option<bool>,
}

impl ConciseCard {
    pub fn from_enriched(card: &EnrichedCard, flatten_legalities: bool) -> Self {
        let source = &card.card;
        let mut concise = ConciseCard {
            name: source.name.clone(),
            quantity: source.quantity,
            set_name: source.set_name.clone(),
            collector_number: source.collector_number.clone(),
            rarity: source.rarity.clone(),
            scryfall_id: source.scryfall_id.clone(),
            mana_box_id: source.mana_box_id.clone(),
            mechanics: Map::new(),
            legalities: None,
            commander_legal: None,
            standard_legal: None,
            modern_legal: None,
        };

        // An empty document counts as no metadata
        let data = match card.scryfall_data.as_ref().and_then(Value::as_object) {
            Some(data) if !data.is_empty() => data,
            _ => return concise,
        };

        for field in GAME_MECHANICS_FIELDS {
            if let Some(value) = data.get(field) {
                concise.mechanics.insert(field.to_string(), value.clone());
            }
        }

        if let Some(legalities) = data.get("legalities") {
            if flatten_legalities {
                concise.commander_legal = Some(is_legal(legalities, "commander"));
                concise.standard_legal = Some(is_legal(legalities, "standard"));
                concise.modern_legal = Some(is_legal(legalities, "modern"));
            } else {
                concise.legalities = Some(legalities.clone());
            }
        }

        concise
    }
}

fn is_legal(legalities: &Value, format: &str) -> bool {
    legalities.get(format).and_then(Value::as_str) == Some(LEGAL)
}

/// Project enriched cards down to their gameplay fields
pub fn create_concise_output(cards: &[EnrichedCard], flatten_legalities: bool) -> Vec<ConciseCard> {
    cards
        .iter()
        .map(|card| ConciseCard::from_enriched(card, flatten_legalities))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ManaboxCard;
    use serde_json::json;

    fn enriched(name: &str, scryfall_data: Option<Value>) -> EnrichedCard {
        EnrichedCard {
            card: ManaboxCard {
                name: name.to_string(),
                quantity: 2,
                price: 1.5,
                total_price: 3.0,
                set_code: "LEA".to_string(),
                set_name: "Limited Edition Alpha".to_string(),
                collector_number: "161".to_string(),
                foil: true,
                rarity: "common".to_string(),
                mana_box_id: "42".to_string(),
                scryfall_id: "abc123".to_string(),
                purchase_price: Some(0.25),
                misprint: false,
                altered: false,
                condition: "Near Mint".to_string(),
                language: "English".to_string(),
                purchase_price_currency: "USD".to_string(),
            },
            scryfall_data,
        }
    }

    fn bolt_data() -> Value {
        json!({
            "object": "card",
            "name": "Lightning Bolt",
            "mana_cost": "{R}",
            "cmc": 1.0,
            "type_line": "Instant",
            "oracle_text": "Lightning Bolt deals 3 damage to any target.",
            "colors": ["R"],
            "color_identity": ["R"],
            "keywords": [],
            "legalities": {
                "standard": "not_legal",
                "modern": "legal",
                "commander": "legal",
                "vintage": "restricted"
            },
            "prices": {"usd": "1.00"}
        })
    }

    #[test]
    fn test_base_fields_always_present() {
        let concise = ConciseCard::from_enriched(&enriched("Lightning Bolt", None), false);
        let value = serde_json::to_value(&concise).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Lightning Bolt",
                "quantity": 2,
                "set_name": "Limited Edition Alpha",
                "collector_number": "161",
                "rarity": "common",
                "scryfall_id": "abc123",
                "mana_box_id": "42"
            })
        );
    }

    #[test]
    fn test_copies_whitelisted_fields_only() {
        let concise = ConciseCard::from_enriched(&enriched("Lightning Bolt", Some(bolt_data())), false);
        let value = serde_json::to_value(&concise).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["type_line"], "Instant");
        assert_eq!(obj["mana_cost"], "{R}");
        assert_eq!(obj["keywords"], json!([]));
        assert!(!obj.contains_key("power"));
        assert!(!obj.contains_key("toughness"));
        assert!(!obj.contains_key("prices"));
        assert!(!obj.contains_key("object"));
        assert!(!obj.contains_key("foil"));
    }

    #[test]
    fn test_field_order_is_stable() {
        let concise = ConciseCard::from_enriched(&enriched("Lightning Bolt", Some(bolt_data())), false);
        let json = serde_json::to_string(&concise).unwrap();

        let keys = [
            "\"name\"",
            "\"mana_box_id\"",
            "\"mana_cost\"",
            "\"cmc\"",
            "\"type_line\"",
            "\"keywords\"",
            "\"legalities\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_legalities_copied_unchanged() {
        let concise = ConciseCard::from_enriched(&enriched("Lightning Bolt", Some(bolt_data())), false);

        assert_eq!(concise.legalities, Some(bolt_data()["legalities"].clone()));
        assert_eq!(concise.commander_legal, None);
        assert_eq!(concise.standard_legal, None);
        assert_eq!(concise.modern_legal, None);
    }

    #[test]
    fn test_flatten_legalities() {
        let concise = ConciseCard::from_enriched(&enriched("Lightning Bolt", Some(bolt_data())), true);

        assert_eq!(concise.legalities, None);
        assert_eq!(concise.commander_legal, Some(true));
        assert_eq!(concise.standard_legal, Some(false));
        assert_eq!(concise.modern_legal, Some(true));

        let value = serde_json::to_value(&concise).unwrap();
        assert!(value.get("legalities").is_none());
        assert_eq!(value["commander_legal"], true);
    }

    #[test]
    fn test_flatten_only_exact_legal_counts() {
        let data = json!({
            "legalities": {"commander": "restricted", "standard": "Legal"}
        });
        let concise = ConciseCard::from_enriched(&enriched("Mox", Some(data)), true);

        assert_eq!(concise.commander_legal, Some(false));
        assert_eq!(concise.standard_legal, Some(false));
        assert_eq!(concise.modern_legal, Some(false));
    }

    #[test]
    fn test_no_legalities_in_metadata() {
        let data = json!({"type_line": "Creature — Goblin", "power": "1", "toughness": "1"});
        let concise = ConciseCard::from_enriched(&enriched("Goblin", Some(data)), true);

        assert_eq!(concise.mechanics["power"], "1");
        assert_eq!(concise.commander_legal, None);
        assert_eq!(concise.legalities, None);
    }

    #[test]
    fn test_empty_metadata_treated_as_absent() {
        let concise = ConciseCard::from_enriched(&enriched("Bolt", Some(json!({}))), true);
        assert!(concise.mechanics.is_empty());
        assert_eq!(concise.commander_legal, None);
    }

    #[test]
    fn test_concise_is_subset_of_full_output() {
        let card = enriched("Lightning Bolt", Some(bolt_data()));
        let full = serde_json::to_value(&card).unwrap();
        let concise = serde_json::to_value(ConciseCard::from_enriched(&card, false)).unwrap();

        for (key, value) in concise.as_object().unwrap() {
            let in_full = full.get(key).or_else(|| full["scryfall_data"].get(key));
            assert_eq!(in_full, Some(value), "field {key} not found in full output");
        }
    }

    #[test]
    fn test_create_concise_output_keeps_order() {
        let cards = vec![
            enriched("A", Some(bolt_data())),
            enriched("B", None),
            enriched("C", Some(bolt_data())),
        ];

        let concise = create_concise_output(&cards, true);
        let names: Vec<&str> = concise.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(concise[1].mechanics.is_empty());
        assert_eq!(concise[2].modern_legal, Some(true));
    }
}
