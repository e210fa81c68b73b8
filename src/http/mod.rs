//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → static asset directory, if configured and the file exists
//!     → listing.rs (`GET /list`)
//!     → dispatch.rs (`?forward=` lookup → proxy target or 403)
//! ```

pub mod dispatch;
pub mod listing;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
