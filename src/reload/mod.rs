//! Route source reloading subsystem.
//!
//! # Data Flow
//! ```text
//! route list file (JSON, edited by an outside process)
//!     → source.rs (stat / read)
//!     → loader.rs (change detection by timestamp, parse, build RouteMap)
//!     → worker.rs (install into RouteTable, sleep interval or backoff)
//! ```
//!
//! # Design Decisions
//! - Polling by modification time instead of filesystem notifications
//! - Load failures stay inside the worker; requests keep the old table
//! - Three-way outcome keeps "unchanged" distinct from "failed"

pub mod loader;
pub mod source;
pub mod worker;

pub use loader::{ReloadError, ReloadOutcome, RouteRecord, TableLoader};
pub use source::{FsSource, SourceReader};
pub use worker::{ReloadState, ReloadWorker};
