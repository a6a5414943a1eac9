//! Application wiring.
//!
//! [`Desk`] composes the venue ports, the persistent state store, and
//! the trading services into one object the CLI drives. All
//! dependencies are injected, so the whole application runs against
//! scripted fakes in tests.

pub mod poller;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::{MarketId, TokenId, Volume};
use crate::error::{Error, Result};
use crate::exchange::{BalanceSource, FillResult, MarketDataSource, MarketInfo, OrderGateway};
use crate::ledger::BalanceLedger;
use crate::store::{DailyPnlTracker, RecentMarketEntry, RecentMarkets, StateStore};
use crate::trade::OrderSubmitter;
use poller::{PollerHandle, QuoteBoard, QuotePoller};

/// The trading desk: one object owning every service the CLI needs.
pub struct Desk {
    market_data: Arc<dyn MarketDataSource>,
    ledger: BalanceLedger,
    submitter: OrderSubmitter,
    pnl: DailyPnlTracker,
    recent: RecentMarkets,
    poller: QuotePoller,
}

impl Desk {
    pub fn new(
        market_data: Arc<dyn MarketDataSource>,
        balances: Arc<dyn BalanceSource>,
        gateway: Arc<dyn OrderGateway>,
        store: Arc<dyn StateStore>,
        poll_interval: Duration,
    ) -> Self {
        let submitter = OrderSubmitter::new(
            Arc::clone(&market_data),
            Arc::clone(&balances),
            Arc::clone(&gateway),
        );
        let pnl = DailyPnlTracker::new(
            Arc::clone(&store),
            BalanceLedger::new(Arc::clone(&balances)),
        );
        let recent = RecentMarkets::new(Arc::clone(&store));
        let poller = QuotePoller::new(
            Arc::clone(&market_data),
            Arc::clone(&balances),
            Arc::new(QuoteBoard::new()),
            poll_interval,
        );

        info!(venue = gateway.venue_name(), "Desk ready");

        Self {
            market_data,
            ledger: BalanceLedger::new(balances),
            submitter,
            pnl,
            recent,
            poller,
        }
    }

    /// Look up a market by question text and record the view.
    pub async fn find_market(&self, query: &str) -> Result<MarketInfo> {
        let market = self
            .market_data
            .search_market(query)
            .await?
            .ok_or_else(|| Error::MarketNotFound(query.to_string()))?;
        self.recent.add(&market.question, &market.id)?;
        Ok(market)
    }

    /// Fetch market metadata by ID and record the view.
    pub async fn view_market(&self, market_id: &MarketId) -> Result<MarketInfo> {
        let market = self.market_data.fetch_market(market_id).await?;
        self.recent.add(&market.question, &market.id)?;
        Ok(market)
    }

    /// Buy `size` shares of an outcome token at the market.
    pub async fn buy(&self, token_id: &TokenId, size: Volume) -> Result<FillResult> {
        self.submitter.submit(token_id, crate::domain::Side::Buy, size).await
    }

    /// Sell `size` shares of an outcome token at the market.
    pub async fn sell(&self, token_id: &TokenId, size: Volume) -> Result<FillResult> {
        self.submitter.submit(token_id, crate::domain::Side::Sell, size).await
    }

    /// Sell the entire position in an outcome token.
    pub async fn sell_all(&self, token_id: &TokenId) -> Result<FillResult> {
        self.submitter.sell_whole_position(token_id).await
    }

    /// Current collateral balance in whole units.
    pub async fn balance(&self) -> Result<rust_decimal::Decimal> {
        self.ledger.collateral().await
    }

    /// Position size in shares for an outcome token.
    pub async fn position(&self, token_id: &TokenId) -> Result<Volume> {
        self.ledger.token_balance(token_id).await
    }

    /// Today's running profit/loss.
    pub async fn daily_pnl(&self) -> Result<rust_decimal::Decimal> {
        self.pnl.daily_pnl().await
    }

    /// Recently viewed markets, most-recent-first.
    pub fn recent_markets(&self) -> Result<Vec<RecentMarketEntry>> {
        self.recent.list()
    }

    /// Drop one entry from the recent-markets list.
    pub fn forget_market(&self, market_id: &MarketId) -> Result<()> {
        self.recent.remove(market_id)
    }

    /// Clear the recent-markets list.
    pub fn clear_recent_markets(&self) -> Result<()> {
        self.recent.clear()
    }

    /// The quote board the poller publishes to.
    #[must_use]
    pub fn quote_board(&self) -> Arc<QuoteBoard> {
        self.poller.board()
    }

    /// Run one polling tick for `tokens` at `size`.
    pub async fn refresh_quotes(&self, tokens: &[TokenId], size: Volume) {
        self.poller.poll_once(tokens, size).await;
    }

    /// Start a background polling cycle. The previous cycle's handle
    /// must be stopped first.
    #[must_use]
    pub fn start_polling(&self, tokens: Vec<TokenId>, size: Volume) -> PollerHandle {
        self.poller.start(tokens, size)
    }
}

#[cfg(feature = "polymarket")]
mod connect {
    use super::*;
    use crate::adapter::polymarket::{PolymarketClient, PolymarketGateway, PolymarketWallet};
    use crate::config::Config;
    use crate::store::JsonFileStore;

    impl Desk {
        /// Wire a desk against the live Polymarket venue.
        pub async fn connect(config: &Config) -> Result<Self> {
            let client = Arc::new(PolymarketClient::new(config.network.api_url.clone()));
            let wallet = Arc::new(PolymarketWallet::new(config)?);
            let gateway = Arc::new(PolymarketGateway::connect(config).await?);
            let store = Arc::new(JsonFileStore::new(config.state_path()));

            Ok(Self::new(
                client,
                wallet,
                gateway,
                store,
                Duration::from_secs(config.polling.interval_secs),
            ))
        }
    }
}
