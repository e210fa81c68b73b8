//! The live routing table.
//!
//! # Responsibilities
//! - Hold the single current snapshot
//! - Replace it atomically on reload
//! - Serve concurrent point lookups and name listings
//!
//! # Design Decisions
//! - The current snapshot sits in an `ArcSwapOption`; readers copy the `Arc`
//!   and never block the writer or each other
//! - Snapshots are built before the swap, so the swap itself is O(1)
//! - A reader holding an old snapshot keeps it alive until its request ends

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::observability::metrics;
use crate::proxy::{ForwardTarget, UpstreamClient};
use crate::routing::snapshot::{RouteMap, RouteSnapshot};

/// Shared routing table. Written by the reload loop, read by every request.
#[derive(Debug)]
pub struct RouteTable {
    current: ArcSwapOption<RouteSnapshot>,
    client: UpstreamClient,
}

impl RouteTable {
    /// Create a table with no snapshot installed; every lookup misses.
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            client,
        }
    }

    /// Build a snapshot from `mapping` and install it in place of the current one.
    ///
    /// Returns the number of routes installed.
    pub fn update(&self, mapping: &RouteMap) -> usize {
        let snapshot = RouteSnapshot::build(mapping, &self.client);
        let installed = snapshot.len();
        self.current.store(Some(Arc::new(snapshot)));
        metrics::set_route_count(installed);
        installed
    }

    /// Target registered under `name` in the current snapshot.
    pub fn lookup(&self, name: &str) -> Option<Arc<ForwardTarget>> {
        match &*self.current.load() {
            Some(snapshot) => snapshot.get(name),
            None => None,
        }
    }

    /// Names in the current snapshot, unordered.
    pub fn list_names(&self) -> Vec<String> {
        self.snapshot()
            .map(|snapshot| snapshot.names())
            .unwrap_or_default()
    }

    /// The current snapshot, if one has been installed.
    pub fn snapshot(&self) -> Option<Arc<RouteSnapshot>> {
        self.current.load_full()
    }

    pub fn len(&self) -> usize {
        match &*self.current.load() {
            Some(snapshot) => snapshot.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(UpstreamClient::default())
    }
}
