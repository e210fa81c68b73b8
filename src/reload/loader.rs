//! Change-detecting loader for the route source.
//!
//! # Responsibilities
//! - Skip work when the source timestamp has not moved
//! - Parse the JSON record list into a name → address map
//! - Remember the timestamp only after a fully successful load
//!
//! # Design Decisions
//! - A failed load leaves the remembered timestamp alone, so the next poll
//!   retries the same content instead of treating it as consumed
//! - Duplicate names resolve in list order: the last record wins
//! - The loader never touches the route table; the caller installs results

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::reload::source::{FsSource, SourceReader};
use crate::routing::RouteMap;

/// One `{name, address}` record of the route source.
///
/// `dashboard` is accepted for `address` so lists produced for the legacy
/// front-end load unchanged. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RouteRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "dashboard")]
    pub address: String,
}

/// Why a reload attempt failed.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("route source {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("route source {} is malformed: {source}", .path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of one reload attempt.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// Timestamp unchanged since the last successful load; nothing to install.
    Unchanged,
    /// New content parsed successfully.
    Updated(RouteMap),
    /// The source could not be read or parsed; keep serving the old table.
    Failed(ReloadError),
}

impl ReloadOutcome {
    /// Metric label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            ReloadOutcome::Unchanged => "unchanged",
            ReloadOutcome::Updated(_) => "updated",
            ReloadOutcome::Failed(_) => "failed",
        }
    }
}

/// Polls a route source and parses it when its timestamp changes.
#[derive(Debug)]
pub struct TableLoader<S = FsSource> {
    source: S,
    last_modified: Option<SystemTime>,
}

impl TableLoader<FsSource> {
    pub fn from_fs() -> Self {
        Self::new(FsSource)
    }
}

impl<S: SourceReader> TableLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_modified: None,
        }
    }

    /// Timestamp of the last successfully loaded source.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Load `path` if it changed since the last successful load.
    pub fn reload(&mut self, path: &Path) -> ReloadOutcome {
        let modified = match self.source.modified(path) {
            Ok(modified) => modified,
            Err(source) => {
                return ReloadOutcome::Failed(ReloadError::SourceUnavailable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if self.last_modified == Some(modified) {
            return ReloadOutcome::Unchanged;
        }

        match self.load(path) {
            Ok(routes) => {
                self.last_modified = Some(modified);
                ReloadOutcome::Updated(routes)
            }
            Err(err) => ReloadOutcome::Failed(err),
        }
    }

    /// Read and parse `path` unconditionally.
    pub fn load(&self, path: &Path) -> Result<RouteMap, ReloadError> {
        let bytes = self
            .source
            .read_all(path)
            .map_err(|source| ReloadError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        parse_routes(&bytes).map_err(|source| ReloadError::MalformedSource {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parse a JSON array of route records into a map.
///
/// A `null` document and `null` elements count as empty.
pub fn parse_routes(bytes: &[u8]) -> Result<RouteMap, serde_json::Error> {
    let records: Option<Vec<Option<RouteRecord>>> = serde_json::from_slice(bytes)?;
    Ok(build_route_map(records.into_iter().flatten().flatten()))
}

/// Fold records into a map in order, then drop empty names and addresses.
///
/// A later record with an empty address still shadows an earlier one for
/// the same name, so the name ends up absent.
pub fn build_route_map(records: impl IntoIterator<Item = RouteRecord>) -> RouteMap {
    let mut routes = RouteMap::new();
    for record in records {
        routes.insert(record.name, record.address);
    }
    routes.retain(|name, address| !name.is_empty() && !address.is_empty());
    routes
}
