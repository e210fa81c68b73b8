//! Pooled HTTP client shared by every forwarding target.

use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::{TokioExecutor, TokioTimer},
};
use std::time::Duration;

use crate::config::UpstreamConfig;

/// Cheaply cloneable handle onto one connection pool.
///
/// Targets built by successive table reloads all share the same pool, so
/// keep-alive connections to a backend survive a reload that keeps it.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    inner: Client<HttpConnector, Body>,
    request_timeout: Option<Duration>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        connector.set_nodelay(true);

        let inner = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build(connector);

        Self {
            inner,
            request_timeout: config.request_timeout(),
        }
    }

    pub(crate) fn inner(&self) -> &Client<HttpConnector, Body> {
        &self.inner
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new(&UpstreamConfig::default())
    }
}
