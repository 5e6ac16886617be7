// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Semantic checks on a parsed hive configuration.
//!
//! All checks run and every failure is collected, so a broken file is
//! reported in one pass rather than one error at a time.

use crate::backends::local::DroneRegistry;
use crate::config::HiveConfig;
use crate::errors::ConfigValidationError;

/// Validate `cfg` against the sources available in `registry`.
///
/// # Examples
///
/// ```
/// use the_hive::backends::local::DroneRegistry;
/// use the_hive::config::{validate_hive_config, HiveConfig};
/// use the_hive::errors::ConfigValidationError;
///
/// let cfg: HiveConfig = serde_yaml::from_str("workers:\n  - source: nope\n").unwrap();
///
/// let errors = validate_hive_config(&cfg, &DroneRegistry::with_builtins()).unwrap_err();
/// assert!(matches!(errors[0], ConfigValidationError::UnknownSource { index: 0, .. }));
/// ```
pub fn validate_hive_config(
    cfg: &HiveConfig,
    registry: &DroneRegistry,
) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if cfg.correlation_id.length == 0 {
        errors.push(ConfigValidationError::InvalidCorrelationIdLength {
            length: cfg.correlation_id.length,
        });
    }
    if cfg.correlation_id.charset.is_empty() {
        errors.push(ConfigValidationError::EmptyCharset);
    }
    if cfg.dispatch.timeout_ms == Some(0) {
        errors.push(ConfigValidationError::ZeroTimeout);
    }

    for (index, worker) in cfg.workers.iter().enumerate() {
        if !registry.is_available(&worker.source) {
            errors.push(ConfigValidationError::UnknownSource {
                index,
                source: worker.source.clone(),
            });
        }
        if worker.count == 0 {
            errors.push(ConfigValidationError::ZeroWorkerCount {
                source: worker.source.clone(),
            });
        }
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
    use crate::config::{CorrelationIdConfig, DispatchConfig, WorkerConfig};

    fn config(workers: Vec<WorkerConfig>) -> HiveConfig {
        HiveConfig {
            correlation_id: CorrelationIdConfig::default(),
            dispatch: DispatchConfig::default(),
            workers,
        }
    }

    fn worker(source: &str, count: usize) -> WorkerConfig {
        WorkerConfig {
            source: source.to_string(),
            count,
        }
    }

    #[test]
    fn test_valid_config() {
        let cfg = config(vec![worker("echo", 1), worker("text_tools", 4)]);

        assert_eq!(validate_hive_config(&cfg, &DroneRegistry::with_builtins()), Ok(()));
    }

    #[test]
    fn test_empty_worker_list_is_valid() {
        let cfg = config(vec![]);

        assert!(validate_hive_config(&cfg, &DroneRegistry::with_builtins()).is_ok());
    }

    #[test]
    fn test_zero_count() {
        let cfg = config(vec![worker("echo", 0)]);

        let errors = validate_hive_config(&cfg, &DroneRegistry::with_builtins()).unwrap_err();

        assert_eq!(
            errors,
            vec![ConfigValidationError::ZeroWorkerCount {
                source: "echo".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_charset() {
        let mut cfg = config(vec![worker("echo", 1)]);
        cfg.correlation_id.charset.clear();

        let errors = validate_hive_config(&cfg, &DroneRegistry::with_builtins()).unwrap_err();

        assert_eq!(errors, vec![ConfigValidationError::EmptyCharset]);
    }

    #[test]
    fn test_unknown_sources_carry_their_position() {
        let cfg = config(vec![worker("echo", 1), worker("ghost", 1), worker("phantom", 2)]);

        let errors = validate_hive_config(&cfg, &DroneRegistry::with_builtins()).unwrap_err();

        assert_eq!(
            errors,
            vec![
                ConfigValidationError::UnknownSource {
                    index: 1,
                    source: "ghost".to_string()
                },
                ConfigValidationError::UnknownSource {
                    index: 2,
                    source: "phantom".to_string()
                },
            ]
        );
    }
}
