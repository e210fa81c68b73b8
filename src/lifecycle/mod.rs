//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build runtime → Check assets → Start reload worker → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Server drains, reload worker exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then background tasks, then listener
//! - One broadcast reaches every long-running task

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
