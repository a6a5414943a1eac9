//! End-to-end flows through the desk against a scripted venue.

use std::sync::Arc;
use std::time::Duration;

use polydesk::app::Desk;
use polydesk::domain::{MarketId, TokenId};
use polydesk::error::{Error, TradeError};
use polydesk::exchange::{BalanceSource, MarketDataSource, OrderGateway};
use polydesk::store::{JsonFileStore, StateStore};
use polydesk::testkit::domain::{binary_market, book, level};
use polydesk::testkit::exchange::ScriptedExchange;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn desk_with_store(venue: Arc<ScriptedExchange>, store: Arc<dyn StateStore>) -> Desk {
    Desk::new(
        Arc::clone(&venue) as Arc<dyn MarketDataSource>,
        Arc::clone(&venue) as Arc<dyn BalanceSource>,
        venue as Arc<dyn OrderGateway>,
        store,
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn view_trade_and_pnl_share_one_desk() {
    let venue = Arc::new(
        ScriptedExchange::new()
            .with_market(binary_market("cond-1", "Will it rain?", "yes", "no"))
            .with_book(book("yes", vec![], vec![level(dec!(0.55), dec!(100))]))
            .with_balance(dec!(100_000_000)),
    );
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let desk = desk_with_store(Arc::clone(&venue), store);

    // First call of the day: baseline reset, flat PnL.
    assert_eq!(desk.daily_pnl().await.unwrap(), dec!(0));

    let market = desk.view_market(&MarketId::from("cond-1")).await.unwrap();
    assert_eq!(market.outcomes.len(), 2);

    let fill = desk.buy(&TokenId::from("yes"), dec!(10)).await.unwrap();
    assert_eq!(fill.average_price, dec!(0.55));

    // The venue debits the buy; PnL reflects it on the next read.
    venue.set_balance(dec!(94_500_000));
    assert_eq!(desk.daily_pnl().await.unwrap(), dec!(-5.5));

    let recent = desk.recent_markets().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name, "Will it rain?");
}

#[tokio::test]
async fn recent_markets_survive_a_desk_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let venue = Arc::new(
        ScriptedExchange::new().with_market(binary_market("cond-1", "Will it rain?", "y", "n")),
    );
    {
        let store = Arc::new(JsonFileStore::new(&path));
        let desk = desk_with_store(Arc::clone(&venue), store);
        desk.view_market(&MarketId::from("cond-1")).await.unwrap();
    }

    let store = Arc::new(JsonFileStore::new(&path));
    let desk = desk_with_store(venue, store);
    let recent = desk.recent_markets().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].market_id, MarketId::from("cond-1"));
}

#[tokio::test]
async fn failed_buy_does_not_touch_recent_markets() {
    let dir = tempdir().unwrap();
    let venue = Arc::new(ScriptedExchange::new().with_book(book(
        "yes",
        vec![],
        vec![level(dec!(0.55), dec!(1))],
    )));
    let store = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let desk = desk_with_store(venue, store);

    let err = desk.buy(&TokenId::from("yes"), dec!(500)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Trade(TradeError::InsufficientLiquidity { .. })
    ));
    assert!(desk.recent_markets().unwrap().is_empty());
}

#[tokio::test]
async fn sell_all_liquidates_the_scripted_position() {
    let venue = Arc::new(
        ScriptedExchange::new()
            .with_book(book("yes", vec![level(dec!(0.62), dec!(100))], vec![]))
            .with_token_balance("yes", dec!(25)),
    );
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    let desk = desk_with_store(Arc::clone(&venue), store);

    let fill = desk.sell_all(&TokenId::from("yes")).await.unwrap();
    assert_eq!(fill.filled_amount, dec!(25));

    let order = venue.last_order().unwrap();
    assert_eq!(order.quantity, dec!(25));
    assert_eq!(order.limit_price, dec!(0.62));
}
