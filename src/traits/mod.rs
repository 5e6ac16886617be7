// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod command;
pub mod handler;
pub mod source;
pub mod worker;

pub use command::Command;
pub use handler::{handler_fn, CommandHandler};
pub use source::{source_fn, DroneSource};
pub use worker::{Worker, WorkerRuntime};
