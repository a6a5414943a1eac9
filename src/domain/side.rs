//! Order side.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the book a trade takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy the outcome token (pays the ask).
    Buy,
    /// Sell the outcome token (receives the bid).
    Sell,
}

impl Side {
    /// Lowercase name for logging and wire payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
