//! Scripted venue implementations for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{MarketId, OrderBook, TokenId, Volume};
use crate::error::{Error, Result, TradeError};
use crate::exchange::{
    BalanceSource, FillResult, MarketDataSource, MarketInfo, MarketOrder, OrderGateway, OrderId,
};

/// A venue whose responses are scripted up-front.
///
/// Implements all three venue ports. Books, balances, and failure modes
/// are set through the builder methods; submitted orders and fetch
/// counts are recorded for assertions.
#[derive(Default)]
pub struct ScriptedExchange {
    books: Mutex<HashMap<TokenId, OrderBook>>,
    book_errors: Mutex<HashMap<TokenId, String>>,
    markets: Mutex<HashMap<MarketId, MarketInfo>>,
    balance: Mutex<Decimal>,
    balance_error: Mutex<Option<String>>,
    token_balances: Mutex<HashMap<TokenId, Volume>>,
    order_rejection: Mutex<Option<String>>,
    orders: Mutex<Vec<MarketOrder>>,
    book_fetches: AtomicU32,
    balance_fetches: AtomicU32,
}

impl ScriptedExchange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an order book for its token.
    #[must_use]
    pub fn with_book(self, book: OrderBook) -> Self {
        self.books.lock().insert(book.token_id().clone(), book);
        self
    }

    /// Script a fetch failure for one token's book.
    #[must_use]
    pub fn with_book_error(self, token_id: &str, reason: &str) -> Self {
        self.book_errors
            .lock()
            .insert(TokenId::from(token_id), reason.to_string());
        self
    }

    /// Script the collateral balance, in raw micro-units.
    #[must_use]
    pub fn with_balance(self, raw: Decimal) -> Self {
        *self.balance.lock() = raw;
        self
    }

    /// Script every balance fetch to fail.
    #[must_use]
    pub fn with_balance_error(self, reason: &str) -> Self {
        *self.balance_error.lock() = Some(reason.to_string());
        self
    }

    /// Script a token position.
    #[must_use]
    pub fn with_token_balance(self, token_id: &str, shares: Volume) -> Self {
        self.token_balances
            .lock()
            .insert(TokenId::from(token_id), shares);
        self
    }

    /// Script market metadata.
    #[must_use]
    pub fn with_market(self, market: MarketInfo) -> Self {
        self.markets.lock().insert(market.id.clone(), market);
        self
    }

    /// Script every order submission to be rejected.
    #[must_use]
    pub fn with_order_rejection(self, reason: &str) -> Self {
        *self.order_rejection.lock() = Some(reason.to_string());
        self
    }

    /// Replace the scripted balance mid-test.
    pub fn set_balance(&self, raw: Decimal) {
        *self.balance.lock() = raw;
    }

    /// Replace a scripted book mid-test.
    pub fn set_book(&self, book: OrderBook) {
        self.books.lock().insert(book.token_id().clone(), book);
    }

    /// Script or replace a book fetch failure mid-test.
    pub fn set_book_error(&self, token_id: &str, reason: &str) {
        self.book_errors
            .lock()
            .insert(TokenId::from(token_id), reason.to_string());
    }

    /// Clear a scripted book error mid-test.
    pub fn clear_book_error(&self, token_id: &str) {
        self.book_errors.lock().remove(&TokenId::from(token_id));
    }

    /// All submitted orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<MarketOrder> {
        self.orders.lock().clone()
    }

    /// The most recently submitted order.
    #[must_use]
    pub fn last_order(&self) -> Option<MarketOrder> {
        self.orders.lock().last().cloned()
    }

    /// Number of order book fetches served (including failures).
    #[must_use]
    pub fn book_fetches(&self) -> u32 {
        self.book_fetches.load(Ordering::SeqCst)
    }

    /// Number of collateral balance fetches served.
    #[must_use]
    pub fn balance_fetches(&self) -> u32 {
        self.balance_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for ScriptedExchange {
    async fn fetch_order_book(&self, token_id: &TokenId) -> Result<OrderBook> {
        self.book_fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.book_errors.lock().get(token_id) {
            return Err(Error::Connection(reason.clone()));
        }

        self.books
            .lock()
            .get(token_id)
            .cloned()
            .ok_or_else(|| Error::Connection(format!("no book scripted for {token_id}")))
    }

    async fn fetch_market(&self, market_id: &MarketId) -> Result<MarketInfo> {
        self.markets
            .lock()
            .get(market_id)
            .cloned()
            .ok_or_else(|| Error::MarketNotFound(market_id.to_string()))
    }

    async fn search_market(&self, query: &str) -> Result<Option<MarketInfo>> {
        let query = query.to_lowercase();
        Ok(self
            .markets
            .lock()
            .values()
            .find(|market| market.question.to_lowercase().contains(&query))
            .cloned())
    }
}

#[async_trait]
impl BalanceSource for ScriptedExchange {
    async fn fetch_balance(&self) -> Result<Decimal> {
        self.balance_fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.balance_error.lock().clone() {
            return Err(Error::Connection(reason));
        }
        Ok(*self.balance.lock())
    }

    async fn fetch_token_balance(&self, token_id: &TokenId) -> Result<Volume> {
        Ok(self
            .token_balances
            .lock()
            .get(token_id)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }
}

#[async_trait]
impl OrderGateway for ScriptedExchange {
    async fn submit_market_order(&self, order: &MarketOrder) -> Result<FillResult> {
        if let Some(reason) = self.order_rejection.lock().clone() {
            return Err(TradeError::OrderRejected(reason).into());
        }

        self.orders.lock().push(order.clone());
        Ok(FillResult {
            order_id: OrderId::new(format!("scripted-{}", self.orders.lock().len())),
            filled_amount: order.quantity,
            average_price: order.limit_price,
        })
    }

    fn venue_name(&self) -> &'static str {
        "Scripted"
    }
}
