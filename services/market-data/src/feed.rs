//! Shared feed state
//!
//! Everything the stream ingestor writes and the HTTP facade reads: the
//! open-interest store, the diagnostic sample ring, the connection state and
//! the ingestion counters. One instance lives for the whole process and is
//! shared through [`SharedFeed`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::metrics::FeedMetrics;
use crate::samples::{IngestionSample, SampleBuffer};
use crate::store::MarketOiStore;

pub type SharedFeed = Arc<FeedState>;

/// Connection lifecycle of the stream ingestor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Diagnostic view served by `/api/ws-debug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedDebugSnapshot {
    pub ws_connected: bool,
    pub markets_tracked: usize,
    pub last_updated_ms: i64,
    pub sample_messages: Vec<IngestionSample>,
}

#[derive(Debug, Default)]
pub struct FeedState {
    pub store: MarketOiStore,
    pub metrics: FeedMetrics,
    samples: Mutex<SampleBuffer>,
    connection: Mutex<ConnectionState>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedFeed {
        Arc::new(Self::new())
    }

    pub fn connection_state(&self) -> ConnectionState {
        *lock(&self.connection)
    }

    pub fn set_connection_state(&self, state: ConnectionState) {
        *lock(&self.connection) = state;
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    pub fn push_sample(&self, sample: IngestionSample) {
        lock(&self.samples).push(sample);
    }

    /// Recent samples, oldest first.
    pub fn samples(&self) -> Vec<IngestionSample> {
        lock(&self.samples).to_vec()
    }

    pub fn debug_snapshot(&self) -> FeedDebugSnapshot {
        FeedDebugSnapshot {
            ws_connected: self.is_connected(),
            markets_tracked: self.store.len(),
            last_updated_ms: self.store.last_update_ms(),
            sample_messages: self.samples(),
        }
    }
}

/// Critical sections here never panic, so a poisoned lock still holds valid data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
