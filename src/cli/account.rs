//! Handlers for the `balance` and `pnl` commands.

use super::output;
use crate::app::Desk;
use crate::error::Result;
use crate::ledger::BalanceLedger;

/// Execute the balance command.
pub async fn balance(desk: &Desk) -> Result<()> {
    let balance = desk.balance().await?;
    output::key_value("Balance", format!("${}", BalanceLedger::display(balance)));
    Ok(())
}

/// Execute the pnl command.
pub async fn pnl(desk: &Desk) -> Result<()> {
    let pnl = desk.daily_pnl().await?;
    output::key_value("Today's PnL", output::signed_amount(pnl));
    Ok(())
}
