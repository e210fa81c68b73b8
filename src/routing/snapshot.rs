//! Immutable name → target mapping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::proxy::{ForwardTarget, UpstreamClient};

/// Name → backend address mapping as produced by the table loader.
pub type RouteMap = HashMap<String, String>;

/// One complete, immutable routing table.
///
/// Built wholesale from a [`RouteMap`] and never modified afterwards; an
/// update installs a new snapshot instead.
#[derive(Debug, Default)]
pub struct RouteSnapshot {
    routes: HashMap<String, Arc<ForwardTarget>>,
}

impl RouteSnapshot {
    /// Build one target per entry, skipping entries with an empty name or address.
    pub fn build(mapping: &RouteMap, client: &UpstreamClient) -> Self {
        let routes = mapping
            .iter()
            .filter(|(name, address)| !name.is_empty() && !address.is_empty())
            .map(|(name, address)| {
                let target = ForwardTarget::new(address.clone(), client.clone());
                (name.clone(), Arc::new(target))
            })
            .collect();

        Self { routes }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ForwardTarget>> {
        self.routes.get(name).cloned()
    }

    /// Registered names in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
