// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Drone sources a hive can be populated from.
//!
//! # Local Backend
//! In-process drone programs registered by name in a
//! [`DroneRegistry`](local::DroneRegistry):
//! - **echo**: replies with the payload unchanged
//! - **text_tools**: text reversal, case conversion, token counting and sums
//!
//! ## Stub Backend (Test-Only)
//! Worker runtimes and sources that misbehave on purpose (refusing posts,
//! never replying, failing every handler) for exercising the queen's
//! failure paths. Not available outside test builds.
//!
//! # Examples
//! ```rust
//! use the_hive::backends::local::DroneRegistry;
//!
//! let registry = DroneRegistry::with_builtins();
//! let source = registry.get("text_tools")?;
//! let drone = source.build()?;
//!
//! assert_eq!(drone.handler_count("reverse_text"), 1);
//! # Ok::<(), the_hive::errors::HiveError>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
