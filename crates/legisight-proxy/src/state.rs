use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::ProxyConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            upstream: UpstreamClient::new(config)?,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}
