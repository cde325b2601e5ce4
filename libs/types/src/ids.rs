//! Identifier types for exchange entities
//!
//! Market identifiers arrive from the stream as strings or as numeric
//! indices; both collapse into a single string key so that `3`, `3.0` and
//! `"3"` address the same market.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;

/// Index of the liquidity-provider account whose positions are summarized.
pub const LLP_ACCOUNT_INDEX: u64 = 281_474_976_710_654;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Stringified market identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketKey(String);

impl MarketKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a JSON identifier.
    ///
    /// Accepts strings, numbers and booleans. Returns `None` for `null`,
    /// arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => {
                if n.is_u64() || n.is_i64() {
                    return Some(Self(n.to_string()));
                }
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
                    Some(Self(format!("{}", f as i64)))
                } else {
                    Some(Self(f.to_string()))
                }
            }
            Value::Bool(b) => Some(Self(b.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for MarketKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarketKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MarketKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
