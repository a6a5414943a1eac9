//! Polymarket REST API client.
//!
//! Provides HTTP client functionality for fetching order books and
//! market metadata from the Polymarket CLOB API. Read-only; order
//! submission goes through [`gateway`](super::gateway).

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{WireBook, WireLevel, WireMarket, WireMarketsPage};
use crate::domain::{MarketId, OrderBook, PriceLevel, TokenId};
use crate::error::{Error, Result};
use crate::exchange::{MarketDataSource, MarketInfo, OutcomeInfo};

/// Terminal pagination cursor returned by the markets listing.
const END_CURSOR: &str = "LTE=";

/// HTTP client for the Polymarket CLOB (Central Limit Order Book) API.
pub struct PolymarketClient {
    client: Client,
    base_url: String,
}

impl PolymarketClient {
    /// Create a new Polymarket client with the given base URL
    /// (e.g., `https://clob.polymarket.com`).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn fetch_markets_page(&self, cursor: Option<&str>) -> Result<WireMarketsPage> {
        let url = match cursor {
            Some(cursor) => format!("{}/markets?next_cursor={}", self.base_url, cursor),
            None => format!("{}/markets", self.base_url),
        };

        let page: WireMarketsPage = self.client.get(&url).send().await?.json().await?;
        debug!(count = page.data.len(), "Fetched markets page");
        Ok(page)
    }
}

fn parse_level(level: &WireLevel) -> Result<PriceLevel> {
    let price = Decimal::from_str(&level.price)
        .map_err(|e| Error::Parse(format!("bad level price '{}': {e}", level.price)))?;
    let size = Decimal::from_str(&level.size)
        .map_err(|e| Error::Parse(format!("bad level size '{}': {e}", level.size)))?;
    Ok(PriceLevel::new(price, size))
}

fn into_market_info(market: WireMarket) -> MarketInfo {
    let game_start_time = market
        .game_start_time
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc));

    MarketInfo {
        id: MarketId::from(market.condition_id),
        question: market.question,
        outcomes: market
            .tokens
            .into_iter()
            .map(|token| OutcomeInfo {
                token_id: TokenId::from(token.token_id),
                name: token.outcome,
            })
            .collect(),
        game_start_time,
        active: market.active,
    }
}

/// Whether the market's event starts on the local calendar day.
/// Markets without a start time are excluded.
fn starts_today(market: &MarketInfo) -> bool {
    market
        .game_start_time
        .is_some_and(|start| start.with_timezone(&Local).date_naive() == Local::now().date_naive())
}

#[async_trait]
impl MarketDataSource for PolymarketClient {
    async fn fetch_order_book(&self, token_id: &TokenId) -> Result<OrderBook> {
        let url = format!("{}/book?token_id={}", self.base_url, token_id);
        let book: WireBook = self.client.get(&url).send().await?.json().await?;

        let mut bids = book
            .bids
            .iter()
            .map(parse_level)
            .collect::<Result<Vec<_>>>()?;
        let mut asks = book
            .asks
            .iter()
            .map(parse_level)
            .collect::<Result<Vec<_>>>()?;

        // Normalize to the domain invariant regardless of wire order:
        // asks ascending, bids descending, best price first.
        asks.sort_by(|a, b| a.price().cmp(&b.price()));
        bids.sort_by(|a, b| b.price().cmp(&a.price()));

        debug!(token_id = %token_id, bids = bids.len(), asks = asks.len(), "Fetched book");
        Ok(OrderBook::with_levels(token_id.clone(), bids, asks))
    }

    async fn fetch_market(&self, market_id: &MarketId) -> Result<MarketInfo> {
        let url = format!("{}/markets/{}", self.base_url, market_id);
        let market: WireMarket = self.client.get(&url).send().await?.json().await?;
        Ok(into_market_info(market))
    }

    async fn search_market(&self, query: &str) -> Result<Option<MarketInfo>> {
        let query = query.to_lowercase();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.fetch_markets_page(cursor.as_deref()).await?;

            let hit = page
                .data
                .into_iter()
                .map(into_market_info)
                .find(|market| market.question.to_lowercase().contains(&query) && starts_today(market));
            if let Some(market) = hit {
                return Ok(Some(market));
            }

            match page.next_cursor {
                Some(next) if next != END_CURSOR => cursor = Some(next),
                _ => return Ok(None),
            }
        }
    }
}
