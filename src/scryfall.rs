// 🔎 Scryfall Lookup Client
// One blocking GET per card, bounded by a timeout. No retries, no cache.

use crate::error::LookupError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com/cards/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_BASE_URL: &str = "SCRYFALL_API_BASE";
const ENV_TIMEOUT_SECS: &str = "SCRYFALL_TIMEOUT_SECS";

// ============================================================================
// LOOKUP TRAIT
// ============================================================================

/// CardLookup - fetch catalog metadata for one card
///
/// The enrichment pipeline only talks to this trait, so tests can swap
/// the network for a canned table.
pub trait CardLookup {
    /// Fetch the metadata document for `scryfall_id`
    fn fetch_card(&self, scryfall_id: &str) -> Result<Value, LookupError>;
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Endpoint the catalog id is appended to
    pub base_url: String,
    /// Upper bound for a whole request (connect + read)
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl LookupConfig {
    /// Defaults, overridden by `SCRYFALL_API_BASE` and `SCRYFALL_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let mut config = LookupConfig::default();

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

// ============================================================================
// SCRYFALL CLIENT
// ============================================================================

pub struct ScryfallClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ScryfallClient {
    pub fn new(config: &LookupConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        ScryfallClient {
            agent,
            base_url: config.base_url.clone(),
        }
    }

    /// `{base_url}/{id}` with the id percent-encoded as one path segment
    pub fn card_url(&self, scryfall_id: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(scryfall_id.trim())
        )
    }
}

impl CardLookup for ScryfallClient {
    fn fetch_card(&self, scryfall_id: &str) -> Result<Value, LookupError> {
        let url = self.card_url(scryfall_id);
        debug!("GET {}", url);

        match self.agent.get(&url).set("Accept", "application/json").call() {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|e| LookupError::Decode(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(LookupError::Status { code }),
            Err(ureq::Error::Transport(err)) => Err(LookupError::Transport(err.to_string())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
