// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::DroneRegistry;
use crate::config::HiveConfig;
use crate::engine::queen::Queen;
use crate::errors::HiveError;

/// Hive builder - turns a configuration into a running queen.
///
/// The `HiveBuilder` applies the correlation id and dispatch settings to a
/// [`Queen`] and spawns every configured worker group in file order, so the
/// hive order matches the `workers` list.
///
/// # Examples
///
/// ```
/// use the_hive::backends::local::DroneRegistry;
/// use the_hive::config::{HiveBuilder, HiveConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cfg: HiveConfig = serde_yaml::from_str("workers:\n  - source: echo\n    count: 2\n")?;
///
/// let queen = HiveBuilder::from_config(&cfg, &DroneRegistry::with_builtins()).await?;
/// assert_eq!(queen.len().await, 2);
///
/// queen.kill().await;
/// # Ok(())
/// # }
/// ```
pub struct HiveBuilder;

impl HiveBuilder {
    /// Build a queen from `cfg`, resolving worker sources through `registry`.
    ///
    /// Expects a configuration that already passed validation; settings that
    /// would fail validation are still rejected here as [`HiveError`]s.
    pub async fn from_config(cfg: &HiveConfig, registry: &DroneRegistry) -> Result<Queen, HiveError> {
        let mut builder = Queen::builder()
            .with_charset(&cfg.correlation_id.charset)?
            .with_correlation_id_length(cfg.correlation_id.length)?
            .cancel_on_remove(cfg.dispatch.cancel_on_remove);

        if let Some(seed) = cfg.correlation_id.seed {
            builder = builder.with_seed(seed);
        }
        if let Some(timeout) = cfg.dispatch.timeout() {
            builder = builder.with_timeout(timeout);
        }

        let queen = builder.build();
        for group in &cfg.workers {
            let source = registry.get(&group.source)?;
            queen.add_workers(source.as_ref(), group.count).await?;
        }

        Ok(queen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorrelationIdConfig, DispatchConfig, WorkerConfig};
    use std::time::Duration;

    fn config(workers: Vec<WorkerConfig>) -> HiveConfig {
        HiveConfig {
            correlation_id: CorrelationIdConfig {
                seed: Some(11),
                ..CorrelationIdConfig::default()
            },
            dispatch: DispatchConfig {
                timeout_ms: Some(1500),
                cancel_on_remove: true,
            },
            workers,
        }
    }

    #[tokio::test]
    async fn test_workers_follow_file_order() {
        let cfg = config(vec![
            WorkerConfig {
                source: "text_tools".into(),
                count: 2,
            },
            WorkerConfig {
                source: "echo".into(),
                count: 1,
            },
        ]);

        let queen = HiveBuilder::from_config(&cfg, &DroneRegistry::with_builtins())
            .await
            .unwrap();

        let sources: Vec<String> = queen
            .workers()
            .await
            .iter()
            .map(|w| w.source().to_string())
            .collect();
        assert_eq!(sources, vec!["text_tools", "text_tools", "echo"]);
        assert_eq!(queen.options().timeout, Some(Duration::from_millis(1500)));
        assert!(queen.options().cancel_on_remove);

        queen.kill().await;
    }

    #[tokio::test]
    async fn test_unknown_source_fails() {
        let cfg = config(vec![WorkerConfig {
            source: "ghost".into(),
            count: 1,
        }]);

        let result = HiveBuilder::from_config(&cfg, &DroneRegistry::with_builtins()).await;

        assert!(matches!(result, Err(HiveError::UnknownSource(name)) if name == "ghost"));
    }
}
