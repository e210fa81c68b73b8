//! Reverse-proxy forwarding.
//!
//! # Data Flow
//! ```text
//! Dispatcher (target found in current snapshot)
//!     → target.rs (rewrite URI onto backend, strip hop-by-hop headers)
//!     → client.rs (shared connection pool)
//!     → Backend
//! ```
//!
//! # Design Decisions
//! - One pool for the whole process; targets are thin handles over it
//! - Responses are streamed back, never buffered
//! - A bad backend address only fails the requests routed to it

pub mod client;
pub mod headers;
pub mod target;

pub use client::UpstreamClient;
pub use target::{ForwardError, ForwardTarget};
