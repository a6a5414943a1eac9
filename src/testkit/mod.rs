//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] — [`ScriptedExchange`](exchange::ScriptedExchange),
//!   a scripted implementation of all three venue ports.
//! - [`domain`] — Builders for domain primitives: levels, books,
//!   tokens, markets.

pub mod domain;
pub mod exchange;
