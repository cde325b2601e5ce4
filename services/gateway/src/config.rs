use market_data::FeedConfig;
use std::net::SocketAddr;
use std::time::Duration;
use types::ids::LLP_ACCOUNT_INDEX;

pub const DEFAULT_PORT: u16 = 3000;

/// Account-query endpoint of the exchange REST API.
pub const DEFAULT_ACCOUNT_API: &str = "https://mainnet.zklighter.elliot.ai/api/v1/account";

/// Runtime configuration for the gateway.
///
/// Only the listen port is read from the environment; everything else is a
/// compiled default that tests override directly.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub account_api: String,
    pub account_index: u64,
    pub upstream_timeout: Duration,
    pub feed: FeedConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            account_api: DEFAULT_ACCOUNT_API.to_string(),
            account_index: LLP_ACCOUNT_INDEX,
            upstream_timeout: Duration::from_secs(15),
            feed: FeedConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Defaults, with `PORT` taken from the environment when set.
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            ..Self::default()
        }
    }

    /// Full account-query URL for the tracked account.
    pub fn account_url(&self) -> String {
        format!("{}?by=index&value={}", self.account_api, self.account_index)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(value, default = DEFAULT_PORT, "Ignoring invalid PORT");
            DEFAULT_PORT
        }),
    }
}
