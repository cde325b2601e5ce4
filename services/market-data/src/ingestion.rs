//! Stream ingestion layer for the Market Data Service
//!
//! Keeps the open-interest store fresh from the exchange's public
//! market-stats channel. Each connection is one session:
//!
//! ```text
//! Disconnected ──► Connecting ──► Connected ──► Disconnected
//!      ▲                │  (connect error)          │
//!      └────────────────┴───── reconnect delay ◄────┘
//! ```
//!
//! The heartbeat timer is owned by the session, so it is dropped together
//! with the connection and a reconnect never leaves a second heartbeat
//! running.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::extract::{extract_open_interest, MARKET_STATS_CHANNEL};
use crate::feed::{ConnectionState, FeedState, SharedFeed};
use crate::samples::IngestionSample;
use crate::store::now_ms;
use crate::transport::{FeedConnection, FeedConnector, FeedFrame};

/// Public market-data stream of the exchange.
pub const DEFAULT_STREAM_URL: &str = "wss://mainnet.zklighter.elliot.ai/stream";

/// Configuration for the stream ingestor.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket endpoint of the market-data feed.
    pub url: String,
    /// Interval between keep-alive pings while connected.
    pub heartbeat_interval: Duration,
    /// Fixed delay before every reconnect attempt.
    pub reconnect_delay: Duration,
    /// Highest market index that gets an explicit per-market subscription.
    pub max_market_index: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STREAM_URL.to_string(),
            heartbeat_interval: Duration::from_secs(15),
            reconnect_delay: Duration::from_secs(2),
            max_market_index: 100,
        }
    }
}

/// Subscription request sent after connecting.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub channel: String,
}

impl SubscribeRequest {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            kind: "subscribe",
            channel: channel.into(),
        }
    }
}

/// Serialized subscribe frames: the wildcard channel, then one per market
/// index in `0..=max_market_index`.
pub fn subscribe_frames(config: &FeedConfig) -> Vec<String> {
    std::iter::once(SubscribeRequest::new(MARKET_STATS_CHANNEL))
        .chain(
            (0..=config.max_market_index)
                .map(|index| SubscribeRequest::new(format!("{}/{}", MARKET_STATS_CHANNEL, index))),
        )
        .filter_map(|request| serde_json::to_string(&request).ok())
        .collect()
}

/// Result of handling a single inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not JSON; dropped without side effects.
    Malformed,
    /// Parsed, sampled, and `upserts` markets updated.
    Applied { upserts: usize },
}

/// Parse one frame, sample it, and apply any OI observations it carries.
pub fn handle_frame(feed: &FeedState, text: &str, now_ms: i64) -> FrameOutcome {
    feed.metrics.record_frame();

    let message: Value = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            feed.metrics.record_malformed();
            debug!(error = %e, len = text.len(), "Dropping non-JSON frame");
            return FrameOutcome::Malformed;
        }
    };

    feed.push_sample(IngestionSample::new(now_ms, &message.to_string()));

    let mut upserts = 0;
    for (market, oi) in extract_open_interest(&message) {
        if feed.store.upsert_at(market, oi, now_ms) {
            upserts += 1;
        }
    }
    feed.metrics.record_upserts(upserts);

    FrameOutcome::Applied { upserts }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ConnectFailed,
    ClosedByServer,
    StreamEnded,
    TransportError,
}

/// Maintains the feed connection and reconnects forever.
pub struct StreamIngestor<C> {
    config: FeedConfig,
    connector: C,
    feed: SharedFeed,
}

impl<C: FeedConnector> StreamIngestor<C> {
    pub fn new(config: FeedConfig, connector: C, feed: SharedFeed) -> Self {
        Self {
            config,
            connector,
            feed,
        }
    }

    /// Run sessions back to back, waiting `reconnect_delay` after each.
    pub async fn run(self) {
        info!(
            url = %self.config.url,
            heartbeat_secs = self.config.heartbeat_interval.as_secs(),
            reconnect_delay_ms = self.config.reconnect_delay.as_millis() as u64,
            "Stream ingestor started"
        );

        loop {
            let end = self.run_session().await;
            debug!(
                reason = ?end,
                delay_ms = self.config.reconnect_delay.as_millis() as u64,
                "Scheduling feed reconnect"
            );
            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }

    /// One connection lifecycle, from connect to disconnect.
    pub async fn run_session(&self) -> SessionEnd {
        self.feed.set_connection_state(ConnectionState::Connecting);
        self.feed.metrics.record_connect_attempt();

        let mut conn = match self.connector.connect(&self.config.url).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Feed connect failed");
                self.feed.set_connection_state(ConnectionState::Disconnected);
                return SessionEnd::ConnectFailed;
            }
        };

        self.feed.set_connection_state(ConnectionState::Connected);
        info!(url = %self.config.url, "Feed connected");
        self.subscribe(conn.as_mut()).await;

        let period = self.config.heartbeat_interval;
        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let end = loop {
            tokio::select! {
                frame = conn.recv() => match frame {
                    Some(Ok(FeedFrame::Close)) => break SessionEnd::ClosedByServer,
                    Some(Ok(FeedFrame::Control)) => {}
                    Some(Ok(data)) => {
                        handle_frame(&self.feed, data.text().unwrap_or_default(), now_ms());
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Feed transport error");
                        break SessionEnd::TransportError;
                    }
                    None => break SessionEnd::StreamEnded,
                },
                _ = heartbeat.tick() => {
                    if let Err(e) = conn.ping().await {
                        debug!(error = %e, "Heartbeat ping failed");
                    }
                }
            }
        };

        conn.close().await;
        self.feed.set_connection_state(ConnectionState::Disconnected);
        self.feed.metrics.record_session_closed();

        let metrics = self.feed.metrics.snapshot();
        info!(
            reason = ?end,
            markets = self.feed.store.len(),
            frames = metrics.frames_received,
            malformed = metrics.frames_malformed,
            upserts = metrics.upserts_applied,
            "Feed disconnected"
        );

        end
    }

    /// Send every subscribe frame; individual failures are ignored.
    async fn subscribe(&self, conn: &mut dyn FeedConnection) -> usize {
        let mut sent = 0;
        for frame in subscribe_frames(&self.config) {
            match conn.send_text(frame).await {
                Ok(()) => sent += 1,
                Err(e) => debug!(error = %e, "Subscribe send failed"),
            }
        }
        info!(sent, "Subscribed to market stats");
        sent
    }
}
