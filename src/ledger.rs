//! Collateral balance queries with unit conversion.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{from_micro_units, TokenId, Volume};
use crate::exchange::BalanceSource;
use crate::error::Result;

/// Stateless view over the venue's balance endpoints.
///
/// The venue reports collateral in 6-decimal fixed-point micro-units;
/// the ledger converts to whole units keeping full precision so PnL
/// subtraction never loses digits. Rounding to two decimals is applied
/// only by [`BalanceLedger::display`].
pub struct BalanceLedger {
    source: Arc<dyn BalanceSource>,
}

impl BalanceLedger {
    pub fn new(source: Arc<dyn BalanceSource>) -> Self {
        Self { source }
    }

    /// Current collateral balance in whole units, full precision.
    pub async fn collateral(&self) -> Result<Decimal> {
        let raw = self.source.fetch_balance().await?;
        Ok(from_micro_units(raw))
    }

    /// Position size in shares for an outcome token.
    pub async fn token_balance(&self, token_id: &TokenId) -> Result<Volume> {
        self.source.fetch_token_balance(token_id).await
    }

    /// Round a balance for display.
    #[must_use]
    pub fn display(amount: Decimal) -> Decimal {
        amount.round_dp(2)
    }
}
