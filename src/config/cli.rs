//! Command-line arguments.
//!
//! Flags override whatever the optional TOML file sets, so a router can be
//! started with nothing but `--listen` and `--dashboard-list`.

use clap::Parser;
use std::path::PathBuf;

use crate::config::schema::RouterConfig;

#[derive(Debug, Parser)]
#[command(name = "dynamic-router")]
#[command(version, about = "Forwards requests to backends named in a hot-reloaded route list", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Route list (JSON array of `{name, address}` records).
    #[arg(short = 'd', long = "dashboard-list", alias = "route-list", value_name = "LIST")]
    pub route_list: Option<PathBuf>,

    /// Listen address.
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Append logs to this file instead of stdout.
    #[arg(long = "log", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Number of runtime worker threads.
    #[arg(long, value_name = "N")]
    pub ncpu: Option<usize>,

    /// Directory of static assets served ahead of forwarding.
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

impl Cli {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut RouterConfig) {
        if let Some(path) = &self.route_list {
            config.reload.source_path = Some(path.clone());
        }
        if let Some(listen) = &self.listen {
            config.listener.bind_address = listen.clone();
        }
        if let Some(path) = &self.log_file {
            config.observability.log_file = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(n) = self.ncpu {
            config.runtime.worker_threads = Some(n);
        }
        if let Some(dir) = &self.assets {
            config.assets.dir = Some(dir.clone());
        }
    }
}
