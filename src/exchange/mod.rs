//! Trait definitions for venue implementations.

mod traits;

pub use traits::{
    BalanceSource, FillResult, MarketDataSource, MarketInfo, MarketOrder, OrderGateway, OrderId,
    OutcomeInfo,
};
