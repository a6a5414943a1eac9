//! Daily profit/loss tracking against a per-day balance baseline.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use super::{PnlBaseline, StateStore};
use crate::error::Result;
use crate::ledger::BalanceLedger;

/// Tracks the running balance delta since the start of the local
/// calendar day.
///
/// The first call of a new day resets the persisted baseline to the
/// current balance and reports zero; every later call that day is one
/// balance fetch plus a subtraction. The reset goes through
/// [`StateStore::update`] with a staleness re-check inside the writer
/// lock, so concurrent first-calls within this process perform exactly
/// one reset. Writers in other processes are not coordinated.
pub struct DailyPnlTracker {
    store: Arc<dyn StateStore>,
    ledger: BalanceLedger,
}

impl DailyPnlTracker {
    pub fn new(store: Arc<dyn StateStore>, ledger: BalanceLedger) -> Self {
        Self { store, ledger }
    }

    /// Today's running PnL: current balance minus the day's baseline.
    pub async fn daily_pnl(&self) -> Result<Decimal> {
        self.pnl_for_day(Local::now().date_naive()).await
    }

    /// Testable inner form taking the calendar day explicitly.
    pub async fn pnl_for_day(&self, today: NaiveDate) -> Result<Decimal> {
        let balance = self.ledger.collateral().await?;

        let state = self.store.load()?;
        if let Some(baseline) = state.pnl {
            if baseline.day == today {
                return Ok(balance - baseline.baseline);
            }
        }

        // Baseline missing or stale: reset under the writer lock,
        // re-checking in case another caller won the race first.
        let written = self.store.update(&mut |state| {
            let fresh = matches!(&state.pnl, Some(b) if b.day == today);
            if !fresh {
                state.pnl = Some(PnlBaseline {
                    day: today,
                    baseline: balance,
                });
            }
        })?;

        let baseline = match written.pnl {
            Some(b) => b.baseline,
            None => balance,
        };

        info!(day = %today, baseline = %baseline, "Daily PnL baseline reset");
        Ok(balance - baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testkit::exchange::ScriptedExchange;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker(venue: Arc<ScriptedExchange>, store: Arc<MemoryStore>) -> DailyPnlTracker {
        DailyPnlTracker::new(store, BalanceLedger::new(venue))
    }

    #[tokio::test]
    async fn first_call_of_day_resets_and_returns_zero() {
        let venue = Arc::new(ScriptedExchange::new().with_balance(dec!(100_000_000)));
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker(venue, Arc::clone(&store));

        let pnl = tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();
        assert_eq!(pnl, dec!(0));

        let baseline = store.load().unwrap().pnl.unwrap();
        assert_eq!(baseline.day, day(2025, 1, 20));
        assert_eq!(baseline.baseline, dec!(100));
    }

    #[tokio::test]
    async fn same_day_calls_report_the_delta() {
        let venue = Arc::new(ScriptedExchange::new().with_balance(dec!(100_000_000)));
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker(Arc::clone(&venue), Arc::clone(&store));

        tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();

        venue.set_balance(dec!(104_500_000));
        let pnl = tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();
        assert_eq!(pnl, dec!(4.5));

        // Still only one baseline, unchanged.
        assert_eq!(store.load().unwrap().pnl.unwrap().baseline, dec!(100));
    }

    #[tokio::test]
    async fn stale_baseline_resets_on_new_day() {
        let venue = Arc::new(ScriptedExchange::new().with_balance(dec!(100_000_000)));
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker(Arc::clone(&venue), Arc::clone(&store));

        tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();
        venue.set_balance(dec!(250_000_000));

        // New day: prior baseline is ignored, reset to current balance.
        let pnl = tracker.pnl_for_day(day(2025, 1, 21)).await.unwrap();
        assert_eq!(pnl, dec!(0));
        assert_eq!(store.load().unwrap().pnl.unwrap().baseline, dec!(250));
    }

    #[tokio::test]
    async fn losing_day_reports_negative_pnl() {
        let venue = Arc::new(ScriptedExchange::new().with_balance(dec!(100_000_000)));
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker(Arc::clone(&venue), Arc::clone(&store));

        tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();
        venue.set_balance(dec!(92_250_000));

        let pnl = tracker.pnl_for_day(day(2025, 1, 20)).await.unwrap();
        assert_eq!(pnl, dec!(-7.75));
    }

    #[tokio::test]
    async fn balance_fetch_failure_leaves_baseline_untouched() {
        let venue = Arc::new(ScriptedExchange::new().with_balance_error("venue unreachable"));
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker(venue, Arc::clone(&store));

        assert!(tracker.pnl_for_day(day(2025, 1, 20)).await.is_err());
        assert!(store.load().unwrap().pnl.is_none());
    }
}
