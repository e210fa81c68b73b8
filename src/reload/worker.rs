//! Background reload loop.
//!
//! # State Machine
//! ```text
//! Idle → Loading → Installing → (interval) → Idle
//!                → Idle       → (interval) → Idle      source unchanged
//!                → BackingOff → (backoff)  → Idle
//! ```
//!
//! The worker is the only writer of the route table. It runs until the
//! shutdown broadcast fires. Stat and read calls run on the blocking pool so
//! a slow mount never stalls a runtime worker that request tasks share.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::ReloadConfig;
use crate::observability::metrics;
use crate::reload::loader::{ReloadOutcome, TableLoader};
use crate::reload::source::{FsSource, SourceReader};
use crate::routing::RouteTable;

/// Where the worker is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    Idle,
    Loading,
    Installing,
    BackingOff,
}

/// Drives a [`TableLoader`] on a fixed cadence and installs what it loads.
pub struct ReloadWorker<S = FsSource> {
    loader: Arc<Mutex<TableLoader<S>>>,
    table: Arc<RouteTable>,
    path: PathBuf,
    interval: Duration,
    backoff: Duration,
    state: ReloadState,
}

impl<S: SourceReader + 'static> ReloadWorker<S> {
    pub fn new(
        loader: TableLoader<S>,
        table: Arc<RouteTable>,
        path: impl Into<PathBuf>,
        config: &ReloadConfig,
    ) -> Self {
        Self {
            loader: Arc::new(Mutex::new(loader)),
            table,
            path: path.into(),
            interval: config.interval(),
            backoff: config.backoff(),
            state: ReloadState::Idle,
        }
    }

    pub fn state(&self) -> ReloadState {
        self.state
    }

    /// Run one reload cycle and return how long to wait before the next.
    pub async fn cycle(&mut self) -> Duration {
        self.state = ReloadState::Loading;
        let outcome = self.load().await;
        metrics::record_reload(outcome.label());
        self.apply(outcome)
    }

    async fn load(&self) -> ReloadOutcome {
        let loader = self.loader.clone();
        let path = self.path.clone();
        let task = tokio::task::spawn_blocking(move || {
            loader
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .reload(&path)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            // Cancelled only while the runtime itself is shutting down.
            Err(_) => ReloadOutcome::Unchanged,
        }
    }

    fn apply(&mut self, outcome: ReloadOutcome) -> Duration {
        match outcome {
            ReloadOutcome::Updated(routes) => {
                self.state = ReloadState::Installing;
                let installed = self.table.update(&routes);
                let mut names: Vec<_> = routes.iter().collect();
                names.sort();
                tracing::info!(
                    path = %self.path.display(),
                    routes = installed,
                    table = ?names,
                    "Route table reloaded"
                );
                self.interval
            }
            ReloadOutcome::Unchanged => {
                self.state = ReloadState::Idle;
                self.interval
            }
            ReloadOutcome::Failed(err) => {
                self.state = ReloadState::BackingOff;
                tracing::warn!(
                    error = %err,
                    backoff_ms = self.backoff.as_millis() as u64,
                    routes = self.table.len(),
                    "Route reload failed, keeping current table"
                );
                self.backoff
            }
        }
    }

    /// Poll until `shutdown` fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis() as u64,
            backoff_ms = self.backoff.as_millis() as u64,
            "Route reload worker starting"
        );

        loop {
            let delay = tokio::select! {
                delay = self.cycle() => delay,
                _ = shutdown.recv() => {
                    tracing::info!("Route reload worker received shutdown signal during load");
                    break;
                }
            };
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    self.state = ReloadState::Idle;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Route reload worker received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
