//! Configuration schema definitions.
//!
//! Every section is optional in the TOML file; missing sections and fields
//! fall back to their `Default` values.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route source polling.
    pub reload: ReloadConfig,

    /// Shared upstream client settings.
    pub upstream: UpstreamConfig,

    /// Static asset serving.
    pub assets: AssetsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Tokio runtime sizing.
    pub runtime: RuntimeConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9090").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Route source reload configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Path to the JSON list of `{name, address}` records.
    pub source_path: Option<PathBuf>,

    /// Delay between polls after a successful cycle, in milliseconds.
    pub interval_ms: u64,

    /// Delay before retrying after a failed cycle, in milliseconds.
    pub backoff_ms: u64,
}

impl ReloadConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            interval_ms: 1000,
            backoff_ms: 5000,
        }
    }
}

/// Settings for the pooled client shared by every forwarding target.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Idle pooled connections are closed after this many seconds.
    pub pool_idle_timeout_secs: u64,

    /// Total time allowed for a forwarded request, 0 disables the limit.
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            pool_idle_timeout_secs: 60,
            request_timeout_secs: 0,
        }
    }
}

/// Static asset directory served ahead of the dispatcher.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: Option<PathBuf>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Optional file that receives log output instead of stdout.
    pub log_file: Option<PathBuf>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9091".to_string(),
        }
    }
}

/// Tokio runtime configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker thread count; defaults to the number of CPUs.
    pub worker_threads: Option<usize>,
}
