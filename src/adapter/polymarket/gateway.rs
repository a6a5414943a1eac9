//! Order submission through the Polymarket CLOB.

use std::str::FromStr;
use std::sync::Arc;

use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use polymarket_client_sdk::auth::state::Authenticated;
use polymarket_client_sdk::auth::Normal;
#[allow(unused_imports)]
use polymarket_client_sdk::auth::Signer;
use polymarket_client_sdk::clob::types::{OrderType, Side as ClobSide};
use polymarket_client_sdk::clob::{Client, Config as ClobConfig};
use polymarket_client_sdk::types::U256;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::Config;
use crate::domain::Side;
use crate::error::{ConfigError, Result, TradeError};
use crate::exchange::{FillResult, MarketOrder, OrderGateway, OrderId};

/// Type alias for the authenticated CLOB client.
type AuthenticatedClient = Client<Authenticated<Normal>>;

/// Submits orders to the Polymarket CLOB.
///
/// The venue's market-order endpoint prices unreliably, so every order
/// goes out as a marketable limit pinned at the caller's pre-computed
/// price. A fill-or-kill order either fills completely against resting
/// liquidity at that price or is rejected whole.
pub struct PolymarketGateway {
    client: Arc<AuthenticatedClient>,
    signer: Arc<PrivateKeySigner>,
}

impl PolymarketGateway {
    /// Create a new gateway by authenticating with the CLOB.
    pub async fn connect(config: &Config) -> Result<Self> {
        let private_key = config
            .wallet
            .private_key
            .as_ref()
            .ok_or(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            })?;

        let chain_id = config.network.chain_id;

        let signer = PrivateKeySigner::from_str(private_key)
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(chain_id));

        info!(
            chain_id = chain_id,
            address = %signer.address(),
            "Creating CLOB client"
        );

        let client = Client::new(&config.network.api_url, ClobConfig::default())
            .map_err(|e| TradeError::AuthFailed(format!("Failed to create CLOB client: {e}")))?
            .authentication_builder(&signer)
            .authenticate()
            .await
            .map_err(|e| TradeError::AuthFailed(e.to_string()))?;

        info!("CLOB client authenticated successfully");

        Ok(Self {
            client: Arc::new(client),
            signer: Arc::new(signer),
        })
    }

    async fn submit(
        &self,
        token_id: &str,
        side: ClobSide,
        order_type: OrderType,
        size: Decimal,
        price: Decimal,
    ) -> Result<OrderId> {
        let token_id_u256 = U256::from_str(token_id).map_err(|e| TradeError::InvalidTokenId {
            token_id: token_id.to_string(),
            reason: e.to_string(),
        })?;

        let order = self
            .client
            .limit_order()
            .token_id(token_id_u256)
            .side(side)
            .order_type(order_type.clone())
            .price(price)
            .size(size)
            .build()
            .await
            .map_err(|e| TradeError::OrderBuildFailed(e.to_string()))?;

        let signed_order = self
            .client
            .sign(self.signer.as_ref(), order)
            .await
            .map_err(|e| TradeError::SigningFailed(e.to_string()))?;

        let response = self
            .client
            .post_order(signed_order)
            .await
            .map_err(|e| TradeError::OrderRejected(e.to_string()))?;

        info!(
            order_id = %response.order_id,
            token_id = token_id,
            side = ?side,
            order_type = %order_type,
            size = %size,
            price = %price,
            "Order submitted"
        );

        Ok(OrderId::new(response.order_id))
    }
}

/// Derive the CLOB parameters for an order.
///
/// The builder wants share counts; Buy quantities arrive as dollars and
/// are converted back at the pinned price. Every order goes out
/// fill-or-kill: the CLOB defaults to GTC, which would let a partial
/// fill rest on the book.
fn clob_parameters(order: &MarketOrder) -> Result<(ClobSide, OrderType, Decimal)> {
    let (side, size) = match order.side {
        Side::Buy => {
            if order.limit_price <= Decimal::ZERO {
                return Err(TradeError::InvalidInput {
                    reason: "limit price must be positive".into(),
                }
                .into());
            }
            (ClobSide::Buy, order.quantity / order.limit_price)
        }
        Side::Sell => (ClobSide::Sell, order.quantity),
    };

    Ok((side, OrderType::FOK, size))
}

#[async_trait]
impl OrderGateway for PolymarketGateway {
    async fn submit_market_order(&self, order: &MarketOrder) -> Result<FillResult> {
        let (side, order_type, size) = clob_parameters(order)?;

        let order_id = self
            .submit(
                order.token_id.as_str(),
                side,
                order_type,
                size,
                order.limit_price,
            )
            .await?;

        Ok(FillResult {
            order_id,
            filled_amount: order.quantity,
            average_price: order.limit_price,
        })
    }

    fn venue_name(&self) -> &'static str {
        "Polymarket"
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::TokenId;

    fn order(side: Side, quantity: Decimal, limit_price: Decimal) -> MarketOrder {
        MarketOrder {
            token_id: TokenId::new("123456"),
            side,
            quantity,
            limit_price,
        }
    }

    #[test]
    fn buy_converts_dollars_to_shares_and_requests_fill_or_kill() {
        let (side, order_type, size) =
            clob_parameters(&order(Side::Buy, dec!(5.50), dec!(0.55))).unwrap();

        assert_eq!(side, ClobSide::Buy);
        assert_eq!(order_type, OrderType::FOK);
        assert_eq!(size, dec!(10));
    }

    #[test]
    fn sell_passes_shares_and_requests_fill_or_kill() {
        let (side, order_type, size) =
            clob_parameters(&order(Side::Sell, dec!(10), dec!(0.50))).unwrap();

        assert_eq!(side, ClobSide::Sell);
        assert_eq!(order_type, OrderType::FOK);
        assert_eq!(size, dec!(10));
    }

    #[test]
    fn buy_with_non_positive_price_is_rejected() {
        let result = clob_parameters(&order(Side::Buy, dec!(5), Decimal::ZERO));

        assert!(matches!(
            result,
            Err(crate::error::Error::Trade(TradeError::InvalidInput { .. }))
        ));
    }
}
