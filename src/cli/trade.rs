//! Handlers for the `buy` and `sell` commands.

use super::{output, OrderArgs, SellArgs};
use crate::app::Desk;
use crate::domain::TokenId;
use crate::error::{Result, TradeError};
use crate::exchange::FillResult;

/// Execute the buy command.
pub async fn buy(desk: &Desk, args: OrderArgs) -> Result<()> {
    let token_id = TokenId::from(args.token_id.as_str());
    let fill = desk.buy(&token_id, args.size).await?;
    report(&fill, "Bought", args.size.to_string());
    Ok(())
}

/// Execute the sell command.
pub async fn sell(desk: &Desk, args: SellArgs) -> Result<()> {
    let token_id = TokenId::from(args.token_id.as_str());

    let fill = if args.all {
        desk.sell_all(&token_id).await?
    } else {
        let size = args.size.ok_or_else(|| TradeError::InvalidInput {
            reason: "sell needs a size or --all".into(),
        })?;
        desk.sell(&token_id, size).await?
    };

    report(&fill, "Sold", fill.filled_amount.to_string());
    Ok(())
}

fn report(fill: &FillResult, verb: &str, size: String) {
    output::ok(format!(
        "{verb} {size} @ {} (order {})",
        fill.average_price, fill.order_id
    ));
}
