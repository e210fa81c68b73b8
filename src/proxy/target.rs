//! Single-backend forwarding target.
//!
//! A target is bound to one backend address for its whole life. It rewrites
//! the request URI onto the backend, strips hop-by-hop headers and relays
//! the backend response as a stream. The path, query string and `Host`
//! header of the inbound request are passed through untouched.

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::uri::{Authority, InvalidUriParts, PathAndQuery, Scheme};
use axum::http::{Request, Response, Uri, Version};
use hyper::body::Incoming;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::proxy::client::UpstreamClient;
use crate::proxy::headers::{append_forwarded_for, strip_hop_by_hop};

/// Errors raised while relaying one request.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("backend address {0:?} is not a valid host:port")]
    InvalidAddress(String),

    #[error("failed to build upstream URI: {0}")]
    Uri(#[from] InvalidUriParts),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
}

/// Forwarding handle for one backend.
#[derive(Debug)]
pub struct ForwardTarget {
    address: String,
    authority: Option<Authority>,
    client: UpstreamClient,
}

impl ForwardTarget {
    /// Bind a target to `address`.
    ///
    /// An address that does not parse as an authority still yields a target;
    /// requests through it fail with [`ForwardError::InvalidAddress`].
    pub fn new(address: impl Into<String>, client: UpstreamClient) -> Self {
        let address = address.into();
        let authority = address.parse::<Authority>().ok();
        Self {
            address,
            authority,
            client,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Relay `request` to the backend and return its response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let upstream = self.prepare(request)?;
        let pending = self.client.inner().request(upstream);

        let response: Response<Incoming> = match self.client.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| ForwardError::Timeout(limit))??,
            None => pending.await?,
        };

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }

    fn prepare(&self, request: Request<Body>) -> Result<Request<Body>, ForwardError> {
        let authority = self
            .authority
            .clone()
            .ok_or_else(|| ForwardError::InvalidAddress(self.address.clone()))?;

        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(authority);
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = Uri::from_parts(uri_parts)?;
        parts.version = Version::HTTP_11;

        strip_hop_by_hop(&mut parts.headers);
        if let Some(ConnectInfo(peer)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            append_forwarded_for(&mut parts.headers, peer.ip());
        }

        Ok(Request::from_parts(parts, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[tokio::test]
    async fn prepare_rewrites_onto_backend() {
        let target = ForwardTarget::new("10.1.2.3:18080", UpstreamClient::default());

        let mut request = Request::builder()
            .uri("/topom/stats?forward=alpha&x=1")
            .header(header::HOST, "router.local:9090")
            .header(header::CONNECTION, "close")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("192.168.0.7:5555".parse::<SocketAddr>().unwrap()));

        let upstream = target.prepare(request).unwrap();

        assert_eq!(
            upstream.uri().to_string(),
            "http://10.1.2.3:18080/topom/stats?forward=alpha&x=1"
        );
        assert_eq!(upstream.headers()[header::HOST], "router.local:9090");
        assert!(!upstream.headers().contains_key(header::CONNECTION));
        assert_eq!(upstream.headers()["x-forwarded-for"], "192.168.0.7");
    }

    #[tokio::test]
    async fn unparseable_address_fails_at_forward_time() {
        let target = ForwardTarget::new("not a host", UpstreamClient::default());
        assert_eq!(target.address(), "not a host");

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let err = target.forward(request).await.unwrap_err();
        assert!(matches!(err, ForwardError::InvalidAddress(addr) if addr == "not a host"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_upstream_error() {
        // Bind then drop to obtain a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let target = ForwardTarget::new(addr.to_string(), UpstreamClient::default());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let err = target.forward(request).await.unwrap_err();
        assert!(matches!(err, ForwardError::Upstream(_)));
    }
}
