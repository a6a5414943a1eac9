//! Polydesk - client-side trading desk for Polymarket.
//!
//! This crate provides the pieces a manual trader needs on top of a
//! prediction-market CLOB (central limit order book): depth-aware price
//! quoting, fill-or-kill market orders, balance and daily PnL tracking,
//! and a small persistent list of recently viewed markets.
//!
//! # Architecture
//!
//! Venue access goes through three ports so every service runs against
//! scripted fakes in tests:
//!
//! - **`exchange::MarketDataSource`** - order books and market metadata
//! - **`exchange::BalanceSource`** - collateral and position balances
//! - **`exchange::OrderGateway`** - signed order submission
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Exchange-agnostic types: order books, slippage quotes
//! - [`error`] - Error types for the crate
//! - [`exchange`] - Trait definitions for venue implementations
//! - [`ledger`] - Balance queries with fixed-point unit conversion
//! - [`store`] - Persistent trader state: PnL baseline, recent markets
//! - [`trade`] - Market-order construction and submission
//! - [`app`] - Application wiring and the quote poller
//! - [`cli`] - Command-line interface
//! - [`adapter`] - Polymarket implementation (requires `polymarket` feature)
//!
//! # Features
//!
//! - `polymarket` - Enable live Polymarket support (REST API, on-chain
//!   balances, order signing). On by default.
//! - `testkit` - Expose the scripted venue fakes to downstream tests.
//!
//! # Example
//!
//! ```no_run
//! use polydesk::domain::{estimate, OrderBook, Side, TokenId};
//! use rust_decimal_macros::dec;
//!
//! let book = OrderBook::new(TokenId::from("token"));
//! let quote = estimate(&book, Side::Buy, dec!(10));
//! assert!(!quote.is_priced());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod store;
pub mod trade;

#[cfg(feature = "polymarket")]
pub mod adapter;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
