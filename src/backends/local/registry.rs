// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use super::programs::{echo_drone, text_tools_drone};
use crate::errors::HiveError;
use crate::traits::{source_fn, DroneSource};

/// Named drone sources a hive can be configured from.
///
/// The built-in set:
/// - "echo" -> replies to `echo` with the payload unchanged
/// - "text_tools" -> `echo`, `reverse_text`, `change_text_case`, `count_tokens` and `sum`
#[derive(Clone, Default)]
pub struct DroneRegistry {
    sources: BTreeMap<String, Arc<dyn DroneSource>>,
}

impl DroneRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in sources.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register(Arc::new(source_fn("echo", echo_drone)))
            .register(Arc::new(source_fn("text_tools", text_tools_drone)));
        registry
    }

    /// Add `source` under its own name, replacing any source already registered as such.
    pub fn register(&mut self, source: Arc<dyn DroneSource>) -> &mut Self {
        self.sources.insert(source.name().to_string(), source);
        self
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn DroneSource>, HiveError> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| HiveError::UnknownSource(name.to_string()))
    }

    /// Registered source names, sorted.
    pub fn list_available(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }
}

impl std::fmt::Debug for DroneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DroneRegistry")
            .field("sources", &self.list_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::drone::Drone;

    #[test]
    fn test_builtins_are_listed() {
        let registry = DroneRegistry::with_builtins();

        assert_eq!(registry.list_available(), vec!["echo", "text_tools"]);
        assert!(registry.is_available("text_tools"));
        assert!(!registry.is_available("nope"));
    }

    #[test]
    fn test_get_unknown_source() {
        let registry = DroneRegistry::with_builtins();

        let result = registry.get("missing");

        assert!(matches!(result, Err(HiveError::UnknownSource(name)) if name == "missing"));
    }

    #[test]
    fn test_text_tools_drone_handles_every_builtin_topic() {
        let drone = DroneRegistry::with_builtins()
            .get("text_tools")
            .unwrap()
            .build()
            .unwrap();

        for topic in ["echo", "reverse_text", "change_text_case", "count_tokens", "sum"] {
            assert_eq!(drone.handler_count(topic), 1, "topic {}", topic);
        }
    }

    #[test]
    fn test_register_custom_source() {
        let mut registry = DroneRegistry::new();
        registry.register(Arc::new(source_fn("blank", Drone::new)));

        assert_eq!(registry.list_available(), vec!["blank"]);
        assert_eq!(registry.get("blank").unwrap().build().unwrap().topic_count(), 0);
    }
}
