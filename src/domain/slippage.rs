//! Execution price estimation against an order book snapshot.
//!
//! Walks the relevant side of the book to find the price level at which
//! a requested size would fully fill, and reports the slippage between
//! that level and the top of book. The walk consumes depth from the
//! best price toward the worst, the same order the venue's matching
//! engine fills a crossing order.

use rust_decimal::Decimal;

use super::book::OrderBook;
use super::money::{Price, Volume};
use super::side::Side;

/// A priced execution estimate for a side and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippageQuote {
    /// Top-of-book price for the selected side.
    pub best_price: Price,
    /// The level price at which the requested size fully fills.
    pub final_price: Price,
    /// `final_price - best_price`, sign preserved.
    pub slippage_value: Decimal,
    /// `slippage_value / best_price`; zero when the best price is zero.
    pub slippage_percent: Decimal,
}

/// Outcome of estimating execution against a book.
///
/// An empty side and insufficient depth are distinct conditions so
/// callers cannot conflate "no market" with "market too thin". The best
/// price is reported independently of fillability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionQuote {
    /// The selected side of the book has no levels at all.
    NoBook,
    /// The side has levels, but cumulative depth is less than the
    /// requested size.
    InsufficientDepth {
        /// Top-of-book price, still meaningful for display.
        best_price: Price,
    },
    /// The requested size fills fully at `final_price`.
    Priced(SlippageQuote),
}

impl ExecutionQuote {
    /// Top-of-book price, if the side had any levels.
    #[must_use]
    pub const fn best_price(&self) -> Option<Price> {
        match self {
            Self::NoBook => None,
            Self::InsufficientDepth { best_price } => Some(*best_price),
            Self::Priced(quote) => Some(quote.best_price),
        }
    }

    /// Executable price, if the size fills.
    #[must_use]
    pub const fn final_price(&self) -> Option<Price> {
        match self {
            Self::Priced(quote) => Some(quote.final_price),
            _ => None,
        }
    }

    /// Check whether the requested size is fillable.
    #[must_use]
    pub const fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }
}

/// Estimate the execution price for `size` shares against `book` on
/// `side`.
///
/// Buy orders consume asks, sell orders consume bids. The walk
/// accumulates share depth level by level from the best price toward
/// the worst; the level at which the accumulated depth reaches `size`
/// supplies the final price, so the quote reflects the worst level a
/// fill-or-kill order of that size would cross.
///
/// Pure function: no I/O, no shared state, safe to call concurrently on
/// a polling cadence. All arithmetic is decimal; rounding is left to
/// display code.
#[must_use]
pub fn estimate(book: &OrderBook, side: Side, size: Volume) -> ExecutionQuote {
    let levels = match side {
        Side::Buy => book.asks(),
        Side::Sell => book.bids(),
    };

    let Some(best) = levels.first() else {
        return ExecutionQuote::NoBook;
    };
    let best_price = best.price();

    let mut filled = Decimal::ZERO;
    for level in levels {
        filled += level.size();
        if filled >= size {
            let final_price = level.price();
            let slippage_value = final_price - best_price;
            let slippage_percent = if best_price > Decimal::ZERO {
                slippage_value / best_price
            } else {
                Decimal::ZERO
            };
            return ExecutionQuote::Priced(SlippageQuote {
                best_price,
                final_price,
                slippage_value,
                slippage_percent,
            });
        }
    }

    ExecutionQuote::InsufficientDepth { best_price }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::PriceLevel;
    use crate::domain::id::TokenId;
    use rust_decimal_macros::dec;

    fn ask_book(asks: Vec<PriceLevel>) -> OrderBook {
        OrderBook::with_levels(TokenId::from("t"), Vec::new(), asks)
    }

    fn bid_book(bids: Vec<PriceLevel>) -> OrderBook {
        OrderBook::with_levels(TokenId::from("t"), bids, Vec::new())
    }

    #[test]
    fn empty_side_is_no_book() {
        let book = OrderBook::new(TokenId::from("t"));
        assert_eq!(estimate(&book, Side::Buy, dec!(1)), ExecutionQuote::NoBook);
        assert_eq!(estimate(&book, Side::Sell, dec!(1)), ExecutionQuote::NoBook);
    }

    #[test]
    fn buy_walks_into_second_level() {
        // 100 @ 0.50 then 50 @ 0.55; buying 120 shares takes the whole
        // best level plus 20 from the next one.
        let book = ask_book(vec![
            PriceLevel::new(dec!(0.50), dec!(100)),
            PriceLevel::new(dec!(0.55), dec!(50)),
        ]);

        let ExecutionQuote::Priced(quote) = estimate(&book, Side::Buy, dec!(120)) else {
            panic!("expected priced quote");
        };
        assert_eq!(quote.best_price, dec!(0.50));
        assert_eq!(quote.final_price, dec!(0.55));
        assert_eq!(quote.slippage_value, dec!(0.05));
        assert_eq!(quote.slippage_percent, dec!(0.1));
    }

    #[test]
    fn buy_beyond_depth_reports_best_price() {
        // Total depth across both levels is 150 shares.
        let book = ask_book(vec![
            PriceLevel::new(dec!(0.50), dec!(100)),
            PriceLevel::new(dec!(0.55), dec!(50)),
        ]);

        assert_eq!(
            estimate(&book, Side::Buy, dec!(200)),
            ExecutionQuote::InsufficientDepth {
                best_price: dec!(0.50)
            }
        );
    }

    #[test]
    fn buy_filling_at_top_of_book_has_zero_slippage() {
        let book = ask_book(vec![
            PriceLevel::new(dec!(0.40), dec!(1000)),
            PriceLevel::new(dec!(0.60), dec!(10)),
        ]);

        let ExecutionQuote::Priced(quote) = estimate(&book, Side::Buy, dec!(5)) else {
            panic!("expected priced quote");
        };
        assert_eq!(quote.final_price, dec!(0.40));
        assert_eq!(quote.slippage_value, dec!(0));
        assert_eq!(quote.slippage_percent, dec!(0));
    }

    #[test]
    fn sell_accumulates_shares_not_notional() {
        // Bids descending: 80 shares @ 0.45, 100 shares @ 0.40.
        let book = bid_book(vec![
            PriceLevel::new(dec!(0.45), dec!(80)),
            PriceLevel::new(dec!(0.40), dec!(100)),
        ]);

        // 100 shares: crosses from the best bid into the 0.40 level.
        let ExecutionQuote::Priced(quote) = estimate(&book, Side::Sell, dec!(100)) else {
            panic!("expected priced quote");
        };
        assert_eq!(quote.best_price, dec!(0.45));
        assert_eq!(quote.final_price, dec!(0.40));
        assert_eq!(quote.slippage_value, dec!(-0.05));

        // 181 shares exceeds the 180 total.
        assert_eq!(
            estimate(&book, Side::Sell, dec!(181)),
            ExecutionQuote::InsufficientDepth {
                best_price: dec!(0.45)
            }
        );
    }

    #[test]
    fn exact_depth_fill_is_priced() {
        let book = bid_book(vec![
            PriceLevel::new(dec!(0.45), dec!(80)),
            PriceLevel::new(dec!(0.40), dec!(100)),
        ]);

        // Exactly the total depth still fills, at the deepest level.
        let quote = estimate(&book, Side::Sell, dec!(180));
        assert!(quote.is_priced());
        assert_eq!(quote.final_price(), Some(dec!(0.40)));
    }

    #[test]
    fn buy_final_price_is_monotone_in_size() {
        let book = ask_book(vec![
            PriceLevel::new(dec!(0.30), dec!(10)),
            PriceLevel::new(dec!(0.50), dec!(10)),
            PriceLevel::new(dec!(0.70), dec!(10)),
        ]);

        let mut last = Decimal::ZERO;
        for size in [dec!(1), dec!(3), dec!(5), dec!(9), dec!(12), dec!(15)] {
            let ExecutionQuote::Priced(quote) = estimate(&book, Side::Buy, size) else {
                panic!("size {size} should be fillable");
            };
            assert!(
                quote.final_price >= last,
                "final price regressed at size {size}"
            );
            last = quote.final_price;
        }
    }

    #[test]
    fn sell_final_price_is_antitone_in_size() {
        let book = bid_book(vec![
            PriceLevel::new(dec!(0.70), dec!(10)),
            PriceLevel::new(dec!(0.50), dec!(10)),
            PriceLevel::new(dec!(0.30), dec!(10)),
        ]);

        let mut last = dec!(1);
        for size in [dec!(1), dec!(5), dec!(15), dec!(25), dec!(30)] {
            let ExecutionQuote::Priced(quote) = estimate(&book, Side::Sell, size) else {
                panic!("size {size} should be fillable");
            };
            assert!(
                quote.final_price <= last,
                "final price improved at size {size}"
            );
            last = quote.final_price;
        }
    }

    #[test]
    fn best_price_is_independent_of_requested_size() {
        let book = ask_book(vec![
            PriceLevel::new(dec!(0.50), dec!(100)),
            PriceLevel::new(dec!(0.55), dec!(50)),
        ]);

        for size in [dec!(1), dec!(60), dec!(500)] {
            assert_eq!(estimate(&book, Side::Buy, size).best_price(), Some(dec!(0.50)));
        }
    }
}
