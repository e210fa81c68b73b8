//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, intervals and log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no route list configured (reload.source_path / --dashboard-list)")]
    MissingSourcePath,

    #[error("invalid listen address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("runtime.worker_threads must be greater than zero")]
    ZeroWorkerThreads,
}

/// Check a fully assembled configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.reload.source_path.is_none() {
        errors.push(ValidationError::MissingSourcePath);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.reload.interval_ms == 0 {
        errors.push(ValidationError::ZeroDuration("reload.interval_ms"));
    }
    if config.reload.backoff_ms == 0 {
        errors.push(ValidationError::ZeroDuration("reload.backoff_ms"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("upstream.connect_timeout_secs"));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.runtime.worker_threads == Some(0) {
        errors.push(ValidationError::ZeroWorkerThreads);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> RouterConfig {
        let mut config = RouterConfig::default();
        config.reload.source_path = Some(PathBuf::from("routes.json"));
        config
    }

    #[test]
    fn default_with_source_is_valid() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = valid_config();
        config.observability.log_level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-addr".to_string();
        config.reload.interval_ms = 0;
        config.observability.log_level = "verbose".to_string();
        config.runtime.worker_threads = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingSourcePath,
                ValidationError::InvalidBindAddress("not-an-addr".to_string()),
                ValidationError::ZeroDuration("reload.interval_ms"),
                ValidationError::UnknownLogLevel("verbose".to_string()),
                ValidationError::ZeroWorkerThreads,
            ]
        );
    }

    #[test]
    fn metrics_address_only_checked_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress(
                "nowhere".to_string()
            )])
        );
    }
}
