//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::domain::ExecutionQuote;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: impl Display) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: impl Display) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: impl Display) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: impl Display) {
    println!("{message}");
}

/// Format a signed amount with gain/loss coloring.
#[must_use]
pub fn signed_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}", format!("-${}", rounded.abs()).red())
    } else {
        format!("{}", format!("+${rounded}").green())
    }
}

/// Render a quote for a table cell. Quotes the book cannot fill are
/// shown as `N/A` rather than a numeric sentinel.
#[must_use]
pub fn quote_cell(quote: &ExecutionQuote) -> String {
    match quote {
        ExecutionQuote::Priced(priced) => format!(
            "{} ({}% slip)",
            priced.final_price,
            (priced.slippage_percent * Decimal::ONE_HUNDRED).round_dp(2)
        ),
        ExecutionQuote::InsufficientDepth { best_price } => {
            format!("N/A (best {best_price})")
        }
        ExecutionQuote::NoBook => "N/A".to_string(),
    }
}

/// Render a position for a table cell: shares held plus their
/// approximate dollar value at the sell-side best bid.
#[must_use]
pub fn position_cell(position: Decimal, sell_quote: &ExecutionQuote) -> String {
    let shares = position.round_dp(2);
    match sell_quote.best_price() {
        Some(best_bid) if position > Decimal::ZERO => {
            format!("{shares} (≈${})", (position * best_bid).round_dp(2))
        }
        _ => shares.to_string(),
    }
}
