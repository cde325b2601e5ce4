//! Feed transport
//!
//! The ingestor talks to the exchange through [`FeedConnector`] and
//! [`FeedConnection`] so the session state machine can be driven by an
//! in-memory transport in tests. [`TungsteniteConnector`] is the production
//! WebSocket implementation.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

/// Errors raised by a feed transport.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("connect to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("send failed: {0}")]
    Send(String),

    #[error("receive failed: {0}")]
    Receive(String),
}

/// Inbound frame relevant to ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFrame {
    Text(String),
    Binary(Vec<u8>),
    /// Server-initiated close.
    Close,
    /// Control frames with no payload of interest.
    Control,
}

impl FeedFrame {
    /// Payload as UTF-8 text, if the frame carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            FeedFrame::Text(text) => Some(text),
            FeedFrame::Binary(bytes) => std::str::from_utf8(bytes).ok(),
            FeedFrame::Close | FeedFrame::Control => None,
        }
    }
}

/// Opens connections to the market-data feed.
#[async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn FeedConnection>, FeedError>;
}

/// One open duplex connection.
#[async_trait]
pub trait FeedConnection: Send {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError>;

    async fn ping(&mut self) -> Result<(), FeedError>;

    /// Next inbound frame; `None` once the stream has ended.
    ///
    /// Must be cancel-safe: the session races it against the heartbeat.
    async fn recv(&mut self) -> Option<Result<FeedFrame, FeedError>>;

    async fn close(&mut self);
}

/// WebSocket connector backed by `tokio-tungstenite`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

#[async_trait]
impl FeedConnector for TungsteniteConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn FeedConnection>, FeedError> {
        let (ws, response) = connect_async(url).await.map_err(|e| FeedError::Connect {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!(status = %response.status(), "WebSocket handshake complete");
        Ok(Box::new(TungsteniteConnection { ws }))
    }
}

struct TungsteniteConnection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FeedConnection for TungsteniteConnection {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError> {
        self.ws
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| FeedError::Send(e.to_string()))
    }

    async fn ping(&mut self) -> Result<(), FeedError> {
        self.ws
            .send(Message::Ping(Default::default()))
            .await
            .map_err(|e| FeedError::Send(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<FeedFrame, FeedError>> {
        let message = match self.ws.next().await? {
            Ok(message) => message,
            Err(e) => return Some(Err(FeedError::Receive(e.to_string()))),
        };
        let frame = match message {
            Message::Text(text) => FeedFrame::Text(text.as_str().to_owned()),
            Message::Binary(bytes) => FeedFrame::Binary(bytes.to_vec()),
            Message::Close(_) => FeedFrame::Close,
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => FeedFrame::Control,
        };
        Some(Ok(frame))
    }

    async fn close(&mut self) {
        if let Err(e) = self.ws.close(None).await {
            debug!(error = %e, "WebSocket close handshake failed");
        }
    }
}
