// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fan-out walkthrough: typed commands, a custom drone and worker removal.
//!
//! Run with `RUST_LOG=debug cargo run --example fan_out_demo` to see the
//! dispatch lifecycle events.

use serde_json::json;
use std::time::Duration;
use the_hive::backends::local::{ChangeTextCase, CountTokens, DroneRegistry, TextCase};
use the_hive::engine::{Drone, Queen};
use the_hive::traits::source_fn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = DroneRegistry::with_builtins();
    let text_tools = registry.get("text_tools")?;

    let queen = Queen::builder()
        .with_seed(2025)
        .with_timeout(Duration::from_secs(5))
        .build();
    queen.add_workers(text_tools.as_ref(), 3).await?;

    println!("🐝 Hive of {} drones", queen.len().await);

    let shouted = queen
        .dispatch_command(&ChangeTextCase {
            text: "the queen and her drones".to_string(),
            case: TextCase::Title,
        })
        .await?;
    println!("change_text_case -> {:?}", shouted);

    let counts = queen
        .dispatch_command(&CountTokens {
            text: "one two three\nfour".to_string(),
        })
        .await?;
    println!("count_tokens -> {:?}", counts);

    // A drone that reports the length of the correlation id it was addressed with.
    let labelled = source_fn("labelled", || {
        let mut drone = Drone::new();
        drone.on_fn("whoami", |request, responder| async move {
            responder.send(json!({ "asked": request.correlation_id.as_str().len() }))?;
            Ok(())
        });
        drone
    });
    let extra = queen.add_worker(&labelled).await?;

    // text_tools drones have no `whoami` handler and answer null.
    let replies = queen.dispatch("whoami", json!(null)).await?;
    println!("whoami -> {}", serde_json::to_string(&replies)?);

    queen.remove_worker(&extra).await;
    println!("🐝 Hive of {} drones after removal", queen.len().await);

    queen.kill().await;
    Ok(())
}
