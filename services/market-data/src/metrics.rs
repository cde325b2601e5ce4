//! Ingestion counters for the Market Data Service
//!
//! Cheap monotonic counters for the stream ingestor, reported through
//! structured logs when a session ends.

use std::sync::atomic::{AtomicU64, Ordering};

/// Core counters for the stream ingestor.
#[derive(Debug, Default)]
pub struct FeedMetrics {
    pub frames_received: AtomicU64,
    pub frames_malformed: AtomicU64,
    pub upserts_applied: AtomicU64,
    pub connect_attempts: AtomicU64,
    pub sessions_closed: AtomicU64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame read off the socket.
    pub fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a frame that was not valid JSON.
    pub fn record_malformed(&self) {
        self.frames_malformed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record market upserts extracted from one frame.
    pub fn record_upserts(&self, count: usize) {
        self.upserts_applied.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_connect_attempt(&self) {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_closed(&self) {
        self.sessions_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Export a consistent-enough snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_malformed: self.frames_malformed.load(Ordering::Relaxed),
            upserts_applied: self.upserts_applied.load(Ordering::Relaxed),
            connect_attempts: self.connect_attempts.load(Ordering::Relaxed),
            sessions_closed: self.sessions_closed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_received: u64,
    pub frames_malformed: u64,
    pub upserts_applied: u64,
    pub connect_attempts: u64,
    pub sessions_closed: u64,
}
