// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::DroneRegistry;
use crate::config::consts::{
    ALPHANUMERIC_CHARSET, DEFAULT_CORRELATION_ID_LENGTH, DEFAULT_WORKER_COUNT,
};
use crate::config::validate_hive_config;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for a hive.
///
/// Describes how correlation ids are generated, how dispatches behave and
/// which drone sources populate the hive. It is typically loaded from a YAML
/// configuration file.
///
/// # Fields
/// * `correlation_id` - Key generation settings (optional)
/// * `dispatch` - Timeout and removal behavior (optional, defaults to waiting forever)
/// * `workers` - Drone sources to spawn, in hive order
///
/// # Example
/// ```yaml
/// correlation_id:
///   length: 32
///   seed: 42
/// dispatch:
///   timeout_ms: 5000
///   cancel_on_remove: false
/// workers:
///   - source: text_tools
///     count: 4
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HiveConfig {
    #[serde(default)]
    pub correlation_id: CorrelationIdConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    pub workers: Vec<WorkerConfig>,
}

/// Correlation id generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrelationIdConfig {
    #[serde(default = "default_correlation_id_length")]
    pub length: usize,
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Fixed seed for reproducible ids; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CorrelationIdConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_CORRELATION_ID_LENGTH,
            charset: ALPHANUMERIC_CHARSET.to_string(),
            seed: None,
        }
    }
}

fn default_correlation_id_length() -> usize {
    DEFAULT_CORRELATION_ID_LENGTH
}

fn default_charset() -> String {
    ALPHANUMERIC_CHARSET.to_string()
}

/// Dispatch behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DispatchConfig {
    /// Deadline applied to every dispatch. Absent means wait forever.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub cancel_on_remove: bool,
}

impl DispatchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// One group of identical workers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerConfig {
    /// Name of a source in the drone registry
    pub source: String,
    #[serde(default = "default_worker_count")]
    pub count: usize,
}

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

/// Read and parse a hive configuration without validating it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HiveConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: HiveConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Read, parse and validate a hive configuration against `registry`.
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
    registry: &DroneRegistry,
) -> Result<HiveConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_hive_config(&cfg, registry).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_minimal_config_applies_defaults() {
        let yaml = r#"
workers:
  - source: echo
"#;

        let cfg: HiveConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.workers, vec![WorkerConfig { source: "echo".into(), count: 1 }]);
        assert_eq!(cfg.correlation_id, CorrelationIdConfig::default());
        assert_eq!(cfg.dispatch.timeout(), None);
        assert!(!cfg.dispatch.cancel_on_remove);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
correlation_id:
  length: 16
  charset: "abc123"
  seed: 7
dispatch:
  timeout_ms: 2500
  cancel_on_remove: true
workers:
  - source: text_tools
    count: 3
  - source: echo
"#;

        let cfg: HiveConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.correlation_id.length, 16);
        assert_eq!(cfg.correlation_id.charset, "abc123");
        assert_eq!(cfg.correlation_id.seed, Some(7));
        assert_eq!(cfg.dispatch.timeout(), Some(Duration::from_millis(2500)));
        assert!(cfg.dispatch.cancel_on_remove);
        assert_eq!(cfg.workers[0].count, 3);
        assert_eq!(cfg.workers[1].count, 1);
    }

    #[test]
    fn test_missing_workers_is_a_parse_error() {
        let file = write_config("dispatch:\n  timeout_ms: 10\n");

        let result = load_config(file.path());

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = load_config("/definitely/not/here/hive.yaml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config("workers:\n  - source: text_tools\n    count: 2\n");

        let cfg = load_and_validate_config(file.path(), &DroneRegistry::with_builtins()).unwrap();

        assert_eq!(cfg.workers[0].count, 2);
    }

    #[test]
    fn test_load_and_validate_reports_every_problem() {
        let yaml = r#"
correlation_id:
  length: 0
dispatch:
  timeout_ms: 0
workers:
  - source: mystery
"#;
        let file = write_config(yaml);

        let result = load_and_validate_config(file.path(), &DroneRegistry::with_builtins());

        match result {
            Err(ConfigError::Invalid(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&ConfigValidationError::UnknownSource {
                    index: 0,
                    source: "mystery".into()
                }));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }
}
