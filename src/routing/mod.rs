//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Reload loop (single writer):
//!     RouteMap (name → address)
//!     → snapshot.rs (build one target per valid entry)
//!     → table.rs (atomic swap of the current snapshot)
//!
//! Request path (many readers):
//!     name from request
//!     → table.rs (copy current snapshot reference, point lookup)
//!     → Return: forwarding target or no match
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; an update replaces, never patches
//! - Readers never lock; the writer never waits for in-flight requests
//! - Explicit no-match rather than a silent default route

pub mod snapshot;
pub mod table;

pub use snapshot::{RouteMap, RouteSnapshot};
pub use table::RouteTable;
