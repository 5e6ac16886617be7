// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::engine::drone::Drone;
use crate::traits::{Command, CommandHandler};

/// Reply with the payload unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Echo(pub Value);

impl Command for Echo {
    const TOPIC: &'static str = "echo";
    type Output = Value;
}

pub fn install(drone: &mut Drone) -> Arc<dyn CommandHandler> {
    drone.on_command::<Echo, _, _>(|Echo(payload)| async move { Ok(payload) })
}
