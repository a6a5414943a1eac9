//! Recently viewed markets, most-recent-first.

use std::sync::Arc;

use tracing::debug;

use super::{dedup_by_market_id, RecentMarketEntry, StateStore};
use crate::domain::MarketId;
use crate::error::Result;

/// Maximum number of entries kept in the list.
pub const MAX_RECENT_MARKETS: usize = 10;

/// Bounded, deduplicated MRU list of markets the user has viewed.
///
/// Mutations are the only way the persisted list changes; all of them
/// run under the store's writer lock. Re-visiting a market moves it to
/// the front instead of duplicating it.
pub struct RecentMarkets {
    store: Arc<dyn StateStore>,
}

impl RecentMarkets {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Record a market view: dedup by ID, push front, truncate to
    /// [`MAX_RECENT_MARKETS`], persist.
    pub fn add(&self, name: &str, market_id: &MarketId) -> Result<()> {
        let entry = RecentMarketEntry {
            name: name.to_string(),
            market_id: market_id.clone(),
        };
        self.store.update(&mut |state| {
            state
                .recent_markets
                .retain(|existing| existing.market_id != entry.market_id);
            state.recent_markets.insert(0, entry.clone());
            state.recent_markets.truncate(MAX_RECENT_MARKETS);
        })?;
        Ok(())
    }

    /// Entries most-recent-first.
    ///
    /// Runs a defensive dedup pass (keep first occurrence by market
    /// ID); if duplicates had crept in, the cleaned list is persisted
    /// before being returned. A clean list never triggers a write.
    pub fn list(&self) -> Result<Vec<RecentMarketEntry>> {
        let state = self.store.load()?;
        let (cleaned, changed) = dedup_by_market_id(state.recent_markets);

        if changed {
            debug!("healing duplicate recent-market entries");
            let healed = cleaned.clone();
            self.store.update(&mut |state| {
                state.recent_markets = healed.clone();
            })?;
        }

        Ok(cleaned)
    }

    /// Drop the entry with `market_id`, if present.
    pub fn remove(&self, market_id: &MarketId) -> Result<()> {
        self.store.update(&mut |state| {
            state
                .recent_markets
                .retain(|entry| &entry.market_id != market_id);
        })?;
        Ok(())
    }

    /// Persist an empty list.
    pub fn clear(&self) -> Result<()> {
        self.store.update(&mut |state| {
            state.recent_markets.clear();
        })?;
        Ok(())
    }
}
