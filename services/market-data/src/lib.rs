//! Market Data Service
//!
//! Ingests the exchange's public market-stats stream and maintains:
//! - Latest open interest per market, with the time of the last update
//! - A small ring of recent raw messages for diagnostics
//! - Connection state and ingestion counters
//!
//! # Architecture
//!
//! ```text
//!   Exchange WebSocket
//!          │
//!    ┌─────▼─────┐
//!    │ Transport │  ← connect, send, ping, recv
//!    └─────┬─────┘
//!          │
//!    ┌─────▼─────┐
//!    │ Ingestor  │  ← subscribe, heartbeat, reconnect
//!    └─────┬─────┘
//!          │
//!    ┌─────▼─────┐
//!    │ Extract   │  ← shape matchers → (market, OI)
//!    └─────┬─────┘
//!          │
//!   ┌──────▼───────┐
//!   │  FeedState   │  ← store + samples + state, read by the gateway
//!   └──────────────┘
//! ```

pub mod extract;
pub mod feed;
pub mod ingestion;
pub mod metrics;
pub mod samples;
pub mod store;
pub mod transport;

pub use feed::{ConnectionState, FeedState, SharedFeed};
pub use ingestion::{FeedConfig, StreamIngestor};
pub use transport::TungsteniteConnector;
