// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod codec;
mod config;
mod hive;

pub use codec::CodecError;
pub use config::{ConfigError, ConfigValidationError};
pub use hive::{HiveError, HiveResult};
