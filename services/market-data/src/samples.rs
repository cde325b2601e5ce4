//! Diagnostic sample ring
//!
//! Keeps the last few parsed feed messages, truncated, so `/api/ws-debug`
//! can show what the exchange is actually sending.

use std::collections::VecDeque;

use serde::Serialize;

/// Number of samples retained.
pub const SAMPLE_CAPACITY: usize = 6;

/// Maximum characters kept from each message.
pub const SAMPLE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionSample {
    /// Receive time, Unix millis.
    pub ts: i64,
    /// Compact JSON of the message, truncated to [`SAMPLE_MAX_CHARS`].
    pub sample: String,
}

impl IngestionSample {
    pub fn new(ts: i64, payload: &str) -> Self {
        Self {
            ts,
            sample: truncate_chars(payload, SAMPLE_MAX_CHARS).to_string(),
        }
    }
}

/// Fixed-capacity FIFO of recent samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<IngestionSample>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: IngestionSample) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Samples oldest first.
    pub fn to_vec(&self) -> Vec<IngestionSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(SAMPLE_CAPACITY)
    }
}

/// Longest prefix of `s` holding at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_and_fifo_eviction() {
        let mut buffer = SampleBuffer::default();
        for i in 0..7 {
            buffer.push(IngestionSample::new(i, &format!("msg-{}", i)));
        }

        let samples = buffer.to_vec();
        assert_eq!(samples.len(), SAMPLE_CAPACITY);
        assert!(samples.iter().all(|s| s.sample != "msg-0"));
        assert_eq!(samples[0].sample, "msg-1");
        assert_eq!(samples[5].sample, "msg-6");
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = SampleBuffer::default();
        for i in 0..1_000 {
            buffer.push(IngestionSample::new(i, "{}"));
            assert!(buffer.len() <= SAMPLE_CAPACITY);
        }
    }

    #[test]
    fn test_truncates_long_payloads() {
        let long = "x".repeat(2_000);
        let sample = IngestionSample::new(1, &long);
        assert_eq!(sample.sample.chars().count(), SAMPLE_MAX_CHARS);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(600);
        let sample = IngestionSample::new(1, &long);
        assert_eq!(sample.sample.chars().count(), SAMPLE_MAX_CHARS);

        let short = IngestionSample::new(1, "hé");
        assert_eq!(short.sample, "hé");
    }
}
