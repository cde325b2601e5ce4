use crate::config::GatewayConfig;
use crate::upstream::{AccountClient, UpstreamError};
use market_data::SharedFeed;

#[derive(Clone)]
pub struct AppState {
    pub account: AccountClient,
    pub account_index: u64,
    pub feed: SharedFeed, // Written by the stream ingestor, read-only here
}

impl AppState {
    pub fn new(config: &GatewayConfig, feed: SharedFeed) -> Result<Self, UpstreamError> {
        Ok(Self {
            account: AccountClient::new(config.account_url(), config.upstream_timeout)?,
            account_index: config.account_index,
            feed,
        })
    }
}
