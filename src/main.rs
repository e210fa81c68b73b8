//! Dynamic HTTP Request Router
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                 DYNAMIC ROUTER                   │
//!                      │                                                  │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ───────────────────┼─▶│  http   │───▶│ dispatch │───▶│  routing   │   │
//!   ?forward=<name>    │  │ server  │    │          │    │   table    │   │
//!                      │  └─────────┘    └────┬─────┘    └─────▲──────┘   │
//!                      │                      │                │ swap     │
//!                      │                      ▼                │          │
//!   Client Response    │                ┌──────────┐    ┌──────┴─────┐    │
//!   ◀──────────────────┼────────────────│  proxy   │    │   reload   │◀───┼── route list
//!                      │                │  target  │    │   worker   │    │   (JSON file)
//!                      │                └────┬─────┘    └────────────┘    │
//!                      └─────────────────────┼────────────────────────────┘
//!                                            ▼
//!                                         Backend
//! ```

use clap::Parser;

use dynamic_router::config::cli::Cli;
use dynamic_router::config::loader::load_config;
use dynamic_router::lifecycle::startup;
use dynamic_router::observability::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.observability)?;

    tracing::info!("dynamic-router v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = startup::build_runtime(&config.runtime)?;
    runtime.block_on(startup::run(config))?;

    tracing::info!("Shutdown complete");
    Ok(())
}
