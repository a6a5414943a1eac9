use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Trading errors with structured variants.
///
/// Every failure mode a caller can act on is a distinct variant; none
/// of these are collapsed into a generic failure.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("invalid order size: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient liquidity for {side} of {requested} on token {token_id}")]
    InsufficientLiquidity {
        token_id: String,
        side: crate::domain::Side,
        requested: rust_decimal::Decimal,
    },

    #[error("order rejected by venue: {0}")]
    OrderRejected(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid token ID '{token_id}': {reason}")]
    InvalidTokenId { token_id: String, reason: String },

    #[error("failed to build order: {0}")]
    OrderBuildFailed(String),

    #[error("failed to sign order: {0}")]
    SigningFailed(String),
}

/// Persistent state errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access state file: {0}")]
    Io(#[source] std::io::Error),

    #[error("corrupt state record: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("market not found: {0}")]
    MarketNotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
