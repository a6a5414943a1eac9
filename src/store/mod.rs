//! Persisted trader state.
//!
//! All session-surviving state lives in a single versioned JSON
//! document: the daily PnL baseline and the recent-markets list. The
//! document replaces the legacy flat key scheme (`pnlDay`, `pnlBase`,
//! `recentMarkets`); [`TraderState::from_document`] migrates the legacy
//! shapes once at load, so every caller sees a typed, already-migrated
//! value.
//!
//! Stores serialize read-modify-write sequences in-process via
//! [`StateStore::update`]. Writers in *other* processes are not
//! coordinated; the state file is a single-writer-preferred resource.

mod json;
mod memory;
pub mod pnl;
pub mod recent;

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::MarketId;
use crate::error::Result;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use pnl::DailyPnlTracker;
pub use recent::RecentMarkets;

/// Current state document version.
pub const STATE_VERSION: u32 = 1;

/// The balance baseline recorded on the first call of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlBaseline {
    /// Local calendar day the baseline belongs to.
    pub day: NaiveDate,
    /// Collateral balance at the start of that day, full precision.
    pub baseline: Decimal,
}

/// One entry in the recent-markets list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentMarketEntry {
    /// Market question or display name.
    pub name: String,
    /// Market identifier, unique within the list.
    pub market_id: MarketId,
}

/// The full persisted state document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderState {
    pub version: u32,
    #[serde(default)]
    pub pnl: Option<PnlBaseline>,
    #[serde(default)]
    pub recent_markets: Vec<RecentMarketEntry>,
}

impl Default for TraderState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            pnl: None,
            recent_markets: Vec::new(),
        }
    }
}

/// Legacy flat key-value shape from the browser-storage era.
#[derive(Debug, Deserialize)]
struct LegacyState {
    #[serde(rename = "pnlDay")]
    pnl_day: Option<String>,
    #[serde(rename = "pnlBase")]
    pnl_base: Option<String>,
    #[serde(rename = "recentMarkets")]
    recent_markets: Option<LegacyRecentMarkets>,
}

/// The recent-markets record was an unordered name-to-id mapping before
/// it became an ordered list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyRecentMarkets {
    List(Vec<RecentMarketEntry>),
    Map(HashMap<String, String>),
}

impl TraderState {
    /// Parse a raw JSON document, migrating legacy shapes.
    ///
    /// Unversioned documents are interpreted as the legacy flat scheme.
    /// Malformed legacy fields are dropped with a warning rather than
    /// failing the whole load; the store self-heals on the next save.
    pub fn from_document(value: serde_json::Value) -> Result<Self> {
        if value.get("version").is_some() {
            return Ok(serde_json::from_value(value)?);
        }

        let legacy: LegacyState = serde_json::from_value(value)?;

        let pnl = match (legacy.pnl_day, legacy.pnl_base) {
            (Some(day), Some(base)) => {
                let day = day.parse::<NaiveDate>();
                let base = base.parse::<Decimal>();
                match (day, base) {
                    (Ok(day), Ok(baseline)) => Some(PnlBaseline { day, baseline }),
                    _ => {
                        warn!("discarding malformed legacy PnL baseline");
                        None
                    }
                }
            }
            _ => None,
        };

        let recent_markets = match legacy.recent_markets {
            Some(LegacyRecentMarkets::List(entries)) => dedup_by_market_id(entries).0,
            Some(LegacyRecentMarkets::Map(map)) => {
                // The legacy mapping carried no ordering; entries come
                // out in arbitrary order and age out through use.
                let entries = map
                    .into_iter()
                    .map(|(name, id)| RecentMarketEntry {
                        name,
                        market_id: MarketId::from(id),
                    })
                    .collect();
                dedup_by_market_id(entries).0
            }
            None => Vec::new(),
        };

        Ok(Self {
            version: STATE_VERSION,
            pnl,
            recent_markets,
        })
    }
}

/// Keep the first occurrence of each market ID. Returns the cleaned
/// list and whether anything was removed.
pub(crate) fn dedup_by_market_id(
    entries: Vec<RecentMarketEntry>,
) -> (Vec<RecentMarketEntry>, bool) {
    let mut seen: Vec<MarketId> = Vec::with_capacity(entries.len());
    let before = entries.len();
    let cleaned: Vec<RecentMarketEntry> = entries
        .into_iter()
        .filter(|entry| {
            if seen.contains(&entry.market_id) {
                false
            } else {
                seen.push(entry.market_id.clone());
                true
            }
        })
        .collect();
    let changed = cleaned.len() != before;
    (cleaned, changed)
}

/// Persistence boundary for [`TraderState`].
///
/// `update` runs the mutation under the store's writer lock, making the
/// read-modify-write atomic with respect to other in-process callers.
pub trait StateStore: Send + Sync {
    /// Load the current state, migrating legacy documents.
    fn load(&self) -> Result<TraderState>;

    /// Atomically load, mutate, and persist the state. Returns the
    /// state as written.
    fn update(&self, mutate: &mut dyn FnMut(&mut TraderState)) -> Result<TraderState>;
}
