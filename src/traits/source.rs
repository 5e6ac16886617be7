// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::drone::Drone;
use crate::errors::HiveError;

/// A named program that builds a fresh drone for each worker.
pub trait DroneSource: Send + Sync {
    fn name(&self) -> &str;

    fn build(&self) -> Result<Drone, HiveError>;
}

/// A [`DroneSource`] backed by a plain constructor closure.
pub struct FnSource<F> {
    name: String,
    build: F,
}

impl<F> DroneSource for FnSource<F>
where
    F: Fn() -> Drone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self) -> Result<Drone, HiveError> {
        Ok((self.build)())
    }
}

/// Name a drone constructor so it can be spawned by a queen or registered.
///
/// ```
/// use serde_json::json;
/// use the_hive::engine::drone::Drone;
/// use the_hive::traits::{source_fn, DroneSource};
///
/// let source = source_fn("pinger", || {
///     let mut drone = Drone::new();
///     drone.on_fn("ping", |_, responder| async move {
///         responder.send(json!("pong"))?;
///         Ok(())
///     });
///     drone
/// });
///
/// assert_eq!(source.name(), "pinger");
/// assert!(source.build().is_ok());
/// ```
pub fn source_fn<F>(name: impl Into<String>, build: F) -> FnSource<F>
where
    F: Fn() -> Drone + Send + Sync,
{
    FnSource {
        name: name.into(),
        build,
    }
}
