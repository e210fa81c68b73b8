//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Assemble the effective configuration: optional file, then flags, then validation.
pub fn load_config(cli: &Cli) -> Result<RouterConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => RouterConfig::default(),
    };
    cli.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: RouterConfig = toml::from_str(
            r#"
            [reload]
            source_path = "/var/lib/router/routes.json"
            interval_ms = 250

            [observability]
            metrics_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.reload.interval_ms, 250);
        assert_eq!(config.reload.backoff_ms, 5000);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9090");
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.upstream.connect_timeout_secs, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_without_route_list_fails_validation() {
        let cli = Cli::parse_from(["dynamic-router", "--listen", "127.0.0.1:0"]);
        match load_config(&cli) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::MissingSourcePath]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn load_from_flags_only() {
        let cli = Cli::parse_from([
            "dynamic-router",
            "--dashboard-list",
            "routes.json",
            "--listen",
            "127.0.0.1:0",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:0");
    }
}
