//! Market open-interest store
//!
//! Latest known open interest per market, plus the time of the last
//! accepted update. Entries are overwritten in place and never evicted, so
//! the map is bounded by the number of distinct markets the exchange lists.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use types::ids::MarketKey;

/// Point-in-time view of the store served by `/api/exchange-oi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OiSnapshot {
    pub total_open_interest: f64,
    pub markets: usize,
    pub last_updated_ms: i64,
}

/// Process-lifetime store of open interest keyed by market.
#[derive(Debug, Default)]
pub struct MarketOiStore {
    markets: DashMap<MarketKey, f64>,
    /// Unix millis of the last accepted upsert; 0 until the first one.
    last_update_ms: AtomicI64,
}

impl MarketOiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `open_interest` for `market` at the current wall-clock time.
    pub fn upsert(&self, market: impl Into<MarketKey>, open_interest: f64) -> bool {
        self.upsert_at(market, open_interest, now_ms())
    }

    /// Record `open_interest` for `market` observed at `now_ms`.
    ///
    /// Non-finite values are ignored and return `false`. The update
    /// timestamp never moves backwards.
    pub fn upsert_at(&self, market: impl Into<MarketKey>, open_interest: f64, now_ms: i64) -> bool {
        if !open_interest.is_finite() {
            return false;
        }
        self.markets.insert(market.into(), open_interest);
        self.last_update_ms.fetch_max(now_ms, Ordering::Relaxed);
        true
    }

    /// Sum of absolute open interest across all markets.
    pub fn total_open_interest(&self) -> f64 {
        self.markets
            .iter()
            .map(|entry| *entry.value())
            .filter(|v| v.is_finite())
            .map(f64::abs)
            .sum()
    }

    /// Latest value stored for `market`.
    pub fn get(&self, market: &str) -> Option<f64> {
        self.markets.get(market).map(|entry| *entry.value())
    }

    /// Number of distinct markets tracked.
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Time of the last accepted upsert, `0` if none yet.
    pub fn last_update_ms(&self) -> i64 {
        self.last_update_ms.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> OiSnapshot {
        OiSnapshot {
            total_open_interest: self.total_open_interest(),
            markets: self.len(),
            last_updated_ms: self.last_update_ms(),
        }
    }
}

/// Current Unix time in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let store = MarketOiStore::new();
        assert!(store.upsert("3", 10.0));
        assert!(store.upsert("3", 25.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.total_open_interest(), 25.0);
        assert_eq!(store.get("3"), Some(25.0));
    }

    #[test]
    fn test_total_uses_absolute_values() {
        let store = MarketOiStore::new();
        store.upsert_at("1", 100.0, 1);
        store.upsert_at("2", -40.0, 2);

        assert_eq!(store.total_open_interest(), 140.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_non_finite_is_noop() {
        let store = MarketOiStore::new();
        assert!(!store.upsert_at("1", f64::NAN, 5));
        assert!(!store.upsert_at("1", f64::INFINITY, 6));

        assert!(store.is_empty());
        assert_eq!(store.last_update_ms(), 0);
    }

    #[test]
    fn test_timestamp_never_regresses() {
        let store = MarketOiStore::new();
        assert_eq!(store.last_update_ms(), 0);

        store.upsert_at("1", 1.0, 2_000);
        store.upsert_at("2", 1.0, 1_000);
        assert_eq!(store.last_update_ms(), 2_000);

        store.upsert_at("1", 2.0, 3_000);
        assert_eq!(store.last_update_ms(), 3_000);
    }

    #[test]
    fn test_snapshot() {
        let store = MarketOiStore::new();
        assert_eq!(
            store.snapshot(),
            OiSnapshot {
                total_open_interest: 0.0,
                markets: 0,
                last_updated_ms: 0,
            }
        );

        store.upsert_at("ETH", 12.5, 77);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.total_open_interest, 12.5);
        assert_eq!(snapshot.markets, 1);
        assert_eq!(snapshot.last_updated_ms, 77);
    }
}
