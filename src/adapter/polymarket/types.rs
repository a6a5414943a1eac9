//! Wire types for the Polymarket CLOB REST API.

use serde::Deserialize;

/// One price level as returned by the book endpoint. Prices and sizes
/// come over the wire as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct WireLevel {
    pub price: String,
    pub size: String,
}

/// Order book payload from `GET /book`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBook {
    #[serde(default)]
    pub bids: Vec<WireLevel>,
    #[serde(default)]
    pub asks: Vec<WireLevel>,
}

/// One outcome token inside a market payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WireToken {
    pub token_id: String,
    pub outcome: String,
}

/// Market payload from `GET /markets/{condition_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMarket {
    pub condition_id: String,
    pub question: String,
    #[serde(default)]
    pub tokens: Vec<WireToken>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub game_start_time: Option<String>,
}

/// One page of the paginated market listing.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMarketsPage {
    #[serde(default)]
    pub data: Vec<WireMarket>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}
