//! On-chain balance queries for the trading wallet.
//!
//! Collateral (USDC) and outcome-token positions both live on Polygon;
//! the venue has no unauthenticated balance endpoint, so balances are
//! read straight from the token contracts. USDC and conditional tokens
//! both use 6 decimals, which is where the micro-unit convention in
//! [`crate::domain::money`] comes from.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::sol;
use async_trait::async_trait;
use polymarket_client_sdk::auth::Signer as _;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::domain::{from_micro_units, TokenId, Volume};
use crate::error::{ConfigError, Error, Result, TradeError};
use crate::exchange::BalanceSource;

/// Native USDC contract address on Polygon mainnet.
const USDC_NATIVE_MAINNET: &str = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359";

/// USDC contract address on Amoy testnet.
const USDC_TESTNET: &str = "0x2E8D98fd126a32362F2Bd8aA427E59a1ec63F780";

/// Conditional Tokens Framework contract on Polygon mainnet.
const CTF_MAINNET: &str = "0x4D97DCd97eC945f40cF65F87097ACe5EA0476045";

/// Conditional Tokens Framework contract on Amoy testnet.
const CTF_TESTNET: &str = "0x69308FB512518e39F9b16112fA8d994F4e2Bf8bB";

/// Public Polygon mainnet RPC endpoint.
const POLYGON_RPC: &str = "https://polygon-rpc.com";

/// Public Amoy testnet RPC endpoint.
const AMOY_RPC: &str = "https://rpc-amoy.polygon.technology";

/// Polygon mainnet chain ID.
const MAINNET_CHAIN_ID: u64 = 137;

// Minimal read-only interfaces for balance queries.
sol! {
    #[sol(rpc)]
    contract IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    contract IERC1155 {
        function balanceOf(address account, uint256 id) external view returns (uint256);
    }
}

/// Balance source backed by Polygon contract reads.
pub struct PolymarketWallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl PolymarketWallet {
    /// Create a wallet view from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is missing or invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let private_key = config
            .wallet
            .private_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            })?;

        let signer = PrivateKeySigner::from_str(private_key)
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(config.network.chain_id));

        Ok(Self {
            signer,
            chain_id: config.network.chain_id,
        })
    }

    /// The wallet address derived from the private key.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    fn rpc_url(&self) -> Result<url::Url> {
        let raw = if self.chain_id == MAINNET_CHAIN_ID {
            POLYGON_RPC
        } else {
            AMOY_RPC
        };
        raw.parse()
            .map_err(|e: url::ParseError| {
                ConfigError::InvalidValue {
                    field: "rpc_url",
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn usdc_address(&self) -> Result<Address> {
        let raw = if self.chain_id == MAINNET_CHAIN_ID {
            USDC_NATIVE_MAINNET
        } else {
            USDC_TESTNET
        };
        parse_address(raw, "usdc_address")
    }

    fn ctf_address(&self) -> Result<Address> {
        let raw = if self.chain_id == MAINNET_CHAIN_ID {
            CTF_MAINNET
        } else {
            CTF_TESTNET
        };
        parse_address(raw, "ctf_address")
    }
}

fn parse_address(raw: &str, field: &'static str) -> Result<Address> {
    Address::from_str(raw).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

fn units_to_decimal(units: U256) -> Decimal {
    let int_val: u128 = units.try_into().unwrap_or(u128::MAX);
    Decimal::from(int_val)
}

#[async_trait]
impl BalanceSource for PolymarketWallet {
    async fn fetch_balance(&self) -> Result<Decimal> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url()?);
        let usdc = IERC20::new(self.usdc_address()?, &provider);

        let balance: U256 = usdc
            .balanceOf(self.signer.address())
            .call()
            .await
            .map_err(|e| Error::Connection(format!("USDC balance query failed: {e}")))?;

        // Raw micro-units; the ledger owns the conversion.
        Ok(units_to_decimal(balance))
    }

    async fn fetch_token_balance(&self, token_id: &TokenId) -> Result<Volume> {
        let position_id =
            U256::from_str(token_id.as_str()).map_err(|e| TradeError::InvalidTokenId {
                token_id: token_id.to_string(),
                reason: e.to_string(),
            })?;

        let provider = ProviderBuilder::new().connect_http(self.rpc_url()?);
        let ctf = IERC1155::new(self.ctf_address()?, &provider);

        let balance: U256 = ctf
            .balanceOf(self.signer.address(), position_id)
            .call()
            .await
            .map_err(|e| Error::Connection(format!("position balance query failed: {e}")))?;

        Ok(from_micro_units(units_to_decimal(balance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn contract_addresses_parse() {
        assert!(Address::from_str(USDC_NATIVE_MAINNET).is_ok());
        assert!(Address::from_str(USDC_TESTNET).is_ok());
        assert!(Address::from_str(CTF_MAINNET).is_ok());
        assert!(Address::from_str(CTF_TESTNET).is_ok());
    }

    #[test]
    fn units_convert_without_scaling() {
        assert_eq!(units_to_decimal(U256::from(1_000_000u64)), dec!(1_000_000));
        assert_eq!(units_to_decimal(U256::ZERO), dec!(0));
    }

    #[test]
    fn missing_private_key_is_a_config_error() {
        let config = Config::default();
        assert!(PolymarketWallet::new(&config).is_err());
    }
}
