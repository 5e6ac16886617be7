// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during hive configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A worker entry references a drone source that isn't registered
    UnknownSource {
        /// Position of the worker entry in the `workers` list
        index: usize,
        /// The unresolved source name
        source: String,
    },
    /// A worker entry asks for zero workers
    ZeroWorkerCount {
        /// The source named by the offending entry
        source: String,
    },
    /// Correlation ids must be at least one character long
    InvalidCorrelationIdLength { length: usize },
    /// The configured correlation id charset has no characters
    EmptyCharset,
    /// A dispatch timeout of zero would fail every command immediately
    ZeroTimeout,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::UnknownSource { index, source } => {
                write!(
                    f,
                    "Worker entry {} references unknown drone source '{}'",
                    index, source
                )
            }
            ConfigValidationError::ZeroWorkerCount { source } => {
                write!(f, "Worker entry for '{}' has a count of zero", source)
            }
            ConfigValidationError::InvalidCorrelationIdLength { length } => {
                write!(
                    f,
                    "Correlation id length must be a positive integer, got {}",
                    length
                )
            }
            ConfigValidationError::EmptyCharset => {
                write!(f, "Correlation id charset must not be empty")
            }
            ConfigValidationError::ZeroTimeout => {
                write!(f, "Dispatch timeout must be greater than zero milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Errors that can occur while loading a hive configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io(std::io::Error),
    /// The configuration file is not valid YAML for a hive
    Parse(serde_yaml::Error),
    /// The configuration parsed but failed validation
    Invalid(Vec<ConfigValidationError>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Failed to read configuration: {}", err),
            ConfigError::Parse(err) => write!(f, "Failed to parse configuration: {}", err),
            ConfigError::Invalid(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(
                    f,
                    "Configuration validation failed:\n{}",
                    messages.join("\n")
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}
