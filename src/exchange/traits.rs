//! Venue trait definitions.
//!
//! These traits are the boundary with the remote trading venue. The
//! venue's matching engine, custody, and order-signing scheme live on
//! the far side; implementations here only fetch data and forward
//! signed orders. None of these calls retry automatically - a failed
//! call is reported once and the caller decides what to do.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{MarketId, OrderBook, Price, Side, TokenId, Volume};
use crate::error::Result;

/// Unique identifier for an order on the venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

impl OrderId {
    /// Create a new OrderId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A market order ready for submission.
///
/// `quantity` semantics differ by side: dollars for Buy, shares for
/// Sell. A limit price is always pinned even though the order is
/// semantically a market order - the venue's own market-order pricing
/// path is defective, so the client pre-computes the price.
#[derive(Debug, Clone)]
pub struct MarketOrder {
    /// The outcome token to trade.
    pub token_id: TokenId,
    /// Buy or Sell.
    pub side: Side,
    /// Dollars (Buy) or shares (Sell).
    pub quantity: Decimal,
    /// The pre-computed execution price, pinned as a limit.
    pub limit_price: Price,
}

/// Confirmation of a fully filled order.
///
/// Orders are always submitted fill-or-kill, so a successful
/// submission implies a complete fill; rejections surface as
/// [`TradeError::OrderRejected`](crate::error::TradeError) instead.
#[derive(Debug, Clone)]
pub struct FillResult {
    /// The order ID assigned by the venue.
    pub order_id: OrderId,
    /// Amount filled (equals the submitted quantity).
    pub filled_amount: Decimal,
    /// Average execution price reported by the venue.
    pub average_price: Price,
}

/// Exchange-agnostic market information.
#[derive(Debug, Clone)]
pub struct MarketInfo {
    /// Unique identifier for the market on the venue.
    pub id: MarketId,
    /// Human-readable market question.
    pub question: String,
    /// Token/outcome identifiers for this market.
    pub outcomes: Vec<OutcomeInfo>,
    /// Scheduled start of the underlying event, if the venue reports one.
    pub game_start_time: Option<DateTime<Utc>>,
    /// Whether the market is currently active for trading.
    pub active: bool,
}

/// Information about a single outcome in a market.
#[derive(Debug, Clone)]
pub struct OutcomeInfo {
    /// Token ID for this outcome.
    pub token_id: TokenId,
    /// Human-readable outcome name (e.g., "Yes", "No").
    pub name: String,
}

/// Read-only market data from the venue.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the current order book snapshot for a token. Idempotent,
    /// no side effects.
    async fn fetch_order_book(&self, token_id: &TokenId) -> Result<OrderBook>;

    /// Fetch market metadata by ID.
    async fn fetch_market(&self, market_id: &MarketId) -> Result<MarketInfo>;

    /// Find the first market whose question contains `query`
    /// (case-insensitive) and whose event starts today, paging through
    /// the venue's market list. Returns `None` when the listing is
    /// exhausted without a match.
    async fn search_market(&self, query: &str) -> Result<Option<MarketInfo>>;
}

/// Balance queries against the venue.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Collateral balance in the venue's 6-decimal fixed-point base
    /// unit. Unit conversion is the caller's responsibility (see
    /// [`BalanceLedger`](crate::ledger::BalanceLedger)).
    async fn fetch_balance(&self) -> Result<Decimal>;

    /// Position size in shares for a specific outcome token.
    async fn fetch_token_balance(&self, token_id: &TokenId) -> Result<Volume>;
}

/// Order submission to the venue.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit a market order fill-or-kill: it fills completely at
    /// submission or is rejected atomically. Never rests on the book,
    /// never partially fills.
    async fn submit_market_order(&self, order: &MarketOrder) -> Result<FillResult>;

    /// Get the venue name for logging/debugging.
    fn venue_name(&self) -> &'static str;
}
