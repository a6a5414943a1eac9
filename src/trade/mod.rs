//! Market-order construction and submission.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{estimate, ExecutionQuote, Side, TokenId, Volume};
use crate::error::{Result, TradeError};
use crate::exchange::{BalanceSource, FillResult, MarketDataSource, MarketOrder, OrderGateway};

/// Builds and submits fill-or-kill market orders priced off the live
/// order book.
///
/// The requested size is always in shares of the outcome token. The
/// venue's buy path is denominated in dollars, so buy quantities are
/// converted with the just-computed execution price; sells pass shares
/// through unchanged. No local state is mutated here - refreshing
/// balances after a fill is the caller's concern.
pub struct OrderSubmitter {
    market_data: Arc<dyn MarketDataSource>,
    balances: Arc<dyn BalanceSource>,
    gateway: Arc<dyn OrderGateway>,
}

impl OrderSubmitter {
    pub fn new(
        market_data: Arc<dyn MarketDataSource>,
        balances: Arc<dyn BalanceSource>,
        gateway: Arc<dyn OrderGateway>,
    ) -> Self {
        Self {
            market_data,
            balances,
            gateway,
        }
    }

    /// Submit a market order for `requested_size` shares.
    ///
    /// Prices against a freshly fetched book, never a cached quote: the
    /// execution price pinned on the order must reflect the depth the
    /// order will actually cross.
    pub async fn submit(
        &self,
        token_id: &TokenId,
        side: Side,
        requested_size: Volume,
    ) -> Result<FillResult> {
        if requested_size <= Decimal::ZERO {
            return Err(TradeError::InvalidInput {
                reason: format!("requested size must be positive, got {requested_size}"),
            }
            .into());
        }

        let book = self.market_data.fetch_order_book(token_id).await?;
        let market_price = match estimate(&book, side, requested_size) {
            ExecutionQuote::Priced(quote) => quote.final_price,
            ExecutionQuote::NoBook | ExecutionQuote::InsufficientDepth { .. } => {
                warn!(
                    token_id = %token_id,
                    side = %side,
                    size = %requested_size,
                    "Book cannot fill requested size"
                );
                return Err(TradeError::InsufficientLiquidity {
                    token_id: token_id.to_string(),
                    side,
                    requested: requested_size,
                }
                .into());
            }
        };

        // Buy quantity is notional dollars at the execution price;
        // sell quantity is shares.
        let quantity = match side {
            Side::Buy => requested_size * market_price,
            Side::Sell => requested_size,
        };

        let order = MarketOrder {
            token_id: token_id.clone(),
            side,
            quantity,
            limit_price: market_price,
        };

        let fill = self.gateway.submit_market_order(&order).await?;
        info!(
            order_id = %fill.order_id,
            token_id = %token_id,
            side = %side,
            quantity = %quantity,
            price = %market_price,
            "Order filled"
        );

        Ok(fill)
    }

    /// Sell the entire current position in `token_id`.
    ///
    /// Fails fast with `InvalidInput` when the position is zero so no
    /// zero-size order makes a round-trip to the venue.
    pub async fn sell_whole_position(&self, token_id: &TokenId) -> Result<FillResult> {
        let position = self.balances.fetch_token_balance(token_id).await?;
        if position <= Decimal::ZERO {
            return Err(TradeError::InvalidInput {
                reason: format!("no position to sell in token {token_id}"),
            }
            .into());
        }

        self.submit(token_id, Side::Sell, position).await
    }
}
