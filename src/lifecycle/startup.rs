//! Startup orchestration.
//!
//! # Responsibilities
//! - Size and build the Tokio runtime
//! - Check the assets directory before accepting traffic
//! - Start the metrics exporter and the route reload worker
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route table starts empty; the first reload cycle runs right away
//! - The listener serves immediately, answering 403 until routes arrive

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use crate::config::{RouterConfig, RuntimeConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::proxy::UpstreamClient;
use crate::reload::{ReloadWorker, TableLoader};
use crate::routing::RouteTable;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("no route list configured")]
    MissingSource,

    #[error("assets directory {} unavailable: {source}", .path.display())]
    Assets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("listen on {address} failed: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Multi-threaded runtime with the configured number of workers.
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime, StartupError> {
    let workers = config
        .worker_threads
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));
    tracing::info!(worker_threads = workers, "Runtime configured");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
pub async fn run(config: RouterConfig) -> Result<(), StartupError> {
    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    serve(config, listener, shutdown).await
}

/// Serve on an already bound listener until `shutdown` fires.
pub async fn serve(
    config: RouterConfig,
    listener: TcpListener,
    shutdown: Shutdown,
) -> Result<(), StartupError> {
    let source_path = config
        .reload
        .source_path
        .clone()
        .ok_or(StartupError::MissingSource)?;

    if let Some(dir) = &config.assets.dir {
        check_assets(dir)?;
        tracing::info!(assets = %dir.display(), "Serving static assets");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let table = Arc::new(RouteTable::new(UpstreamClient::new(&config.upstream)));

    tracing::info!(
        listen = %config.listener.bind_address,
        source = %source_path.display(),
        interval_ms = config.reload.interval_ms,
        backoff_ms = config.reload.backoff_ms,
        "Configuration loaded"
    );

    let worker = ReloadWorker::new(
        TableLoader::from_fs(),
        table.clone(),
        source_path,
        &config.reload,
    );
    let reload_task = worker.spawn(shutdown.subscribe());

    let server = HttpServer::new(&config, table);
    let served = server.run(listener, shutdown.subscribe()).await;

    // Stop the worker even if the server failed on its own.
    shutdown.trigger();
    if let Err(e) = reload_task.await {
        tracing::error!(error = %e, "Route reload worker panicked");
    }

    served.map_err(StartupError::Serve)
}

fn check_assets(dir: &Path) -> Result<(), StartupError> {
    let metadata = std::fs::metadata(dir).map_err(|source| StartupError::Assets {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(StartupError::Assets {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }
    Ok(())
}
