//! Command-line interface definitions.

pub mod account;
pub mod market;
pub mod output;
pub mod recent;
pub mod trade;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::app::Desk;
use crate::error::Result;

/// Polydesk - Polymarket trading desk.
#[derive(Parser, Debug)]
#[command(name = "polydesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a market and show live quotes
    Market(MarketArgs),

    /// Buy outcome-token shares at the market
    Buy(OrderArgs),

    /// Sell outcome-token shares at the market
    Sell(SellArgs),

    /// Show collateral balance
    Balance,

    /// Show today's running profit/loss
    Pnl,

    /// Manage the recently viewed markets list
    Recent(RecentArgs),
}

/// Arguments for the `market` command.
#[derive(Parser, Debug)]
pub struct MarketArgs {
    /// Market question text to search for
    pub query: Option<String>,

    /// Look up by market (condition) ID instead of searching
    #[arg(long, conflicts_with = "query")]
    pub id: Option<String>,

    /// Keep the quote table refreshing until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Order size in shares used for quoting
    #[arg(long, default_value = "10")]
    pub size: Decimal,
}

/// Arguments for the `buy` command.
#[derive(Parser, Debug)]
pub struct OrderArgs {
    /// Outcome token ID
    pub token_id: String,

    /// Order size in shares
    pub size: Decimal,
}

/// Arguments for the `sell` command.
#[derive(Parser, Debug)]
pub struct SellArgs {
    /// Outcome token ID
    pub token_id: String,

    /// Order size in shares (omit with --all)
    #[arg(required_unless_present = "all")]
    pub size: Option<Decimal>,

    /// Sell the entire position
    #[arg(long, conflicts_with = "size")]
    pub all: bool,
}

/// Arguments for the `recent` command.
#[derive(Parser, Debug)]
pub struct RecentArgs {
    /// Clear the whole list
    #[arg(long)]
    pub clear: bool,

    /// Remove one entry by market ID
    #[arg(long, conflicts_with = "clear")]
    pub remove: Option<String>,
}

/// Dispatch a parsed command against the desk.
pub async fn run(cli: Cli, desk: &Desk) -> Result<()> {
    match cli.command {
        Commands::Market(args) => market::execute(desk, args).await,
        Commands::Buy(args) => trade::buy(desk, args).await,
        Commands::Sell(args) => trade::sell(desk, args).await,
        Commands::Balance => account::balance(desk).await,
        Commands::Pnl => account::pnl(desk).await,
        Commands::Recent(args) => recent::execute(desk, args).await,
    }
}
