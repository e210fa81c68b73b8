//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML) + command-line flags
//!     → loader.rs (parse, overlay flags)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → passed by reference to startup
//! ```
//!
//! The route list itself is not part of this configuration; it is polled
//! at runtime by the `reload` subsystem.
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    AssetsConfig, ListenerConfig, ObservabilityConfig, ReloadConfig, RouterConfig,
    RuntimeConfig, UpstreamConfig,
};
