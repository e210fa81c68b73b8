//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Serve static assets ahead of the dispatcher
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener and shut down on the broadcast signal

use axum::{
    body::Body,
    handler::Handler,
    http::Request,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::http::dispatch::dispatch;
use crate::http::listing::list_routes;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
}

/// HTTP front end of the router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading routes from `table`.
    pub fn new(config: &RouterConfig, table: Arc<RouteTable>) -> Self {
        let state = AppState { table };
        let router = Self::build_router(config.assets.dir.as_deref(), state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `/list` answers GET; any other method on it, and every path not
    /// matched by a static file, goes to the dispatcher.
    fn build_router(assets: Option<&Path>, state: AppState) -> Router {
        let router = Router::new().route("/list", get(list_routes).fallback(dispatch));

        let router = match assets {
            Some(dir) => {
                let static_files = ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(dispatch.with_state(state.clone()));
                router.fallback_service(static_files)
            }
            None => router.fallback(dispatch),
        };

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request),
                    )
                }))
                .layer(propagate_request_id_layer()),
        )
    }

    /// Consume the server, returning its router.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
