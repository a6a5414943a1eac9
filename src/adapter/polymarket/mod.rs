//! Polymarket exchange integration.

mod client;
mod gateway;
mod types;
mod wallet;

pub use client::PolymarketClient;
pub use gateway::PolymarketGateway;
pub use wallet::PolymarketWallet;
