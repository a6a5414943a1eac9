//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{MarketId, OrderBook, PriceLevel, TokenId};
use crate::exchange::{MarketInfo, OutcomeInfo};

/// Create a [`TokenId`] from a string.
#[must_use]
pub fn token(id: &str) -> TokenId {
    TokenId::from(id)
}

/// Create a [`PriceLevel`].
#[must_use]
pub fn level(price: Decimal, size: Decimal) -> PriceLevel {
    PriceLevel::new(price, size)
}

/// Create an order book with the given bid and ask levels.
#[must_use]
pub fn book(token_id: &str, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> OrderBook {
    OrderBook::with_levels(TokenId::from(token_id), bids, asks)
}

/// Create a binary market with YES/NO outcome tokens.
#[must_use]
pub fn binary_market(id: &str, question: &str, yes_token: &str, no_token: &str) -> MarketInfo {
    MarketInfo {
        id: MarketId::from(id),
        question: question.to_string(),
        outcomes: vec![
            OutcomeInfo {
                token_id: TokenId::from(yes_token),
                name: "Yes".to_string(),
            },
            OutcomeInfo {
                token_id: TokenId::from(no_token),
                name: "No".to_string(),
            },
        ],
        game_start_time: None,
        active: true,
    }
}
