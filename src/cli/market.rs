//! Handler for the `market` command.

use std::time::Duration;

use rust_decimal::Decimal;
use tabled::{Table, Tabled};
use tokio::signal;

use super::{output, MarketArgs};
use crate::app::poller::QuoteBoard;
use crate::app::Desk;
use crate::domain::{MarketId, TokenId, Volume};
use crate::error::{Error, Result, TradeError};
use crate::exchange::MarketInfo;

#[derive(Tabled)]
struct QuoteRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Buy")]
    buy: String,
    #[tabled(rename = "Sell")]
    sell: String,
    #[tabled(rename = "Position")]
    position: String,
}

/// Execute the market command.
pub async fn execute(desk: &Desk, args: MarketArgs) -> Result<()> {
    if args.size <= Decimal::ZERO {
        return Err(TradeError::InvalidInput {
            reason: "quote size must be positive".into(),
        }
        .into());
    }

    let market = match (&args.query, &args.id) {
        (Some(query), None) => desk.find_market(query).await?,
        (None, Some(id)) => desk.view_market(&MarketId::from(id.as_str())).await?,
        _ => {
            return Err(TradeError::InvalidInput {
                reason: "provide a search query or --id".into(),
            }
            .into())
        }
    };

    output::section(&market.question);
    output::key_value("Market ID", market.id.as_str());
    output::key_value("Active", market.active);
    if let Some(start) = market.game_start_time {
        output::key_value("Starts", start.to_rfc3339());
    }

    let tokens: Vec<TokenId> = market
        .outcomes
        .iter()
        .map(|o| o.token_id.clone())
        .collect();

    desk.refresh_quotes(&tokens, args.size).await;
    print_board(&market, &desk.quote_board(), args.size);

    if args.watch {
        watch(desk, &market, tokens, args.size).await?;
    }

    Ok(())
}

async fn watch(
    desk: &Desk,
    market: &MarketInfo,
    tokens: Vec<TokenId>,
    size: Volume,
) -> Result<()> {
    output::note("Watching quotes; press Ctrl-C to stop.");

    let handle = desk.start_polling(tokens, size);
    let board = desk.quote_board();

    let refresh = async {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            print_board(market, &board, size);
        }
    };

    tokio::select! {
        _ = refresh => {}
        result = signal::ctrl_c() => {
            result.map_err(Error::Io)?;
        }
    }

    handle.stop();
    output::note("Stopped.");
    Ok(())
}

fn print_board(market: &MarketInfo, board: &QuoteBoard, size: Volume) {
    let rows: Vec<QuoteRow> = market
        .outcomes
        .iter()
        .map(|outcome| match board.get(&outcome.token_id) {
            Some(quotes) => QuoteRow {
                outcome: outcome.name.clone(),
                buy: output::quote_cell(&quotes.buy),
                sell: output::quote_cell(&quotes.sell),
                position: output::position_cell(quotes.position, &quotes.sell),
            },
            None => QuoteRow {
                outcome: outcome.name.clone(),
                buy: "N/A".into(),
                sell: "N/A".into(),
                position: "-".into(),
            },
        })
        .collect();

    println!();
    output::note(format!("Quotes for {size} shares"));
    println!("{}", Table::new(rows));
}
