//! Exchange-agnostic domain types and pure pricing logic.

pub mod book;
pub mod id;
pub mod money;
pub mod side;
pub mod slippage;

pub use book::{OrderBook, PriceLevel};
pub use id::{MarketId, TokenId};
pub use money::{from_micro_units, Price, Volume};
pub use side::Side;
pub use slippage::{estimate, ExecutionQuote, SlippageQuote};
