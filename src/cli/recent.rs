//! Handler for the `recent` command.

use tabled::{Table, Tabled};

use super::{output, RecentArgs};
use crate::app::Desk;
use crate::domain::MarketId;
use crate::error::Result;

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Market")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Execute the recent command.
pub async fn execute(desk: &Desk, args: RecentArgs) -> Result<()> {
    if args.clear {
        desk.clear_recent_markets()?;
        output::ok("Recent markets cleared");
        return Ok(());
    }

    if let Some(id) = args.remove {
        desk.forget_market(&MarketId::from(id.as_str()))?;
        output::ok(format!("Removed {id}"));
        return Ok(());
    }

    let entries = desk.recent_markets()?;
    if entries.is_empty() {
        output::note("No recently viewed markets.");
        return Ok(());
    }

    let rows: Vec<RecentRow> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RecentRow {
            index: i + 1,
            name: entry.name,
            id: entry.market_id.to_string(),
        })
        .collect();

    output::section("Recently viewed markets");
    println!("{}", Table::new(rows));
    Ok(())
}
