// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use serde_json::Value;
use std::env;
use the_hive::backends::local::DroneRegistry;
use the_hive::config::{load_and_validate_config, HiveBuilder};
use tracing_subscriber::EnvFilter;

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <config.yaml> <topic> [payload-json]\n\
         Example: {program} configs/hive-demo.yaml reverse_text '{{\"text\": \"hello world\"}}'\n\
         Example: {program} configs/hive-demo.yaml count_tokens '{{\"text\": \"one two\"}}'"
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        let program = args.first().map(String::as_str).unwrap_or("the-hive");
        eprintln!("{}", usage(program));
        std::process::exit(1);
    }

    let config_file = &args[1];
    let topic = &args[2];
    let payload: Value = match args.get(3) {
        Some(raw) => serde_json::from_str(raw)
            .with_context(|| format!("payload is not valid JSON: {}", raw))?,
        None => Value::Null,
    };

    let registry = DroneRegistry::with_builtins();
    let cfg = load_and_validate_config(config_file, &registry)
        .with_context(|| format!("failed to load {}", config_file))?;
    let queen = HiveBuilder::from_config(&cfg, &registry).await?;

    let outcome = queen.dispatch(topic, payload).await;
    queen.kill().await;

    match outcome? {
        Some(replies) => println!("{}", serde_json::to_string_pretty(&replies)?),
        None => println!("null"),
    }

    Ok(())
}
