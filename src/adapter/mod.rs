//! Venue adapters implementing the exchange ports.

pub mod polymarket;
