//! Configuration loading from TOML files.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub api_url: String,
    /// 80002 = Amoy testnet, 137 = Polygon mainnet.
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Quote and balance refresh cadence in seconds.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON state file. Defaults to
    /// `<data dir>/polydesk/state.json`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Signing key; normally supplied via the `WALLET_PRIVATE_KEY`
    /// environment variable rather than the config file.
    pub private_key: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        if config.wallet.private_key.is_none() {
            config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY").ok();
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "polling.interval_secs",
                reason: "must be at least 1 second".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve the state file path, falling back to the platform data
    /// directory.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("polydesk")
                .join("state.json")
        })
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            polling: PollingConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: "https://clob.polymarket.com".into(),
            chain_id: 137,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

const fn default_poll_interval() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_mainnet() {
        let config = Config::default();
        assert_eq!(config.network.api_url, "https://clob.polymarket.com");
        assert_eq!(config.network.chain_id, 137);
        assert_eq!(config.polling.interval_secs, 5);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = Config {
            polling: PollingConfig { interval_secs: 0 },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn state_path_prefers_configured_path() {
        let config = Config {
            store: StoreConfig {
                path: Some(PathBuf::from("/tmp/desk.json")),
            },
            ..Config::default()
        };
        assert_eq!(config.state_path(), PathBuf::from("/tmp/desk.json"));
    }
}
