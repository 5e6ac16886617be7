// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Coordinator and worker halves of the hive.
//!
//! * [`queen`] - owns the worker pool, fans commands out and joins replies
//! * [`drone`] - routes inbound envelopes to handlers inside a worker
//! * [`task_worker`] - default worker runtime built on tokio tasks
//! * [`wire`] - envelope and reply shapes
//! * [`aggregate`] - the shape a joined dispatch resolves to

pub mod aggregate;
pub mod drone;
pub mod queen;
pub mod task_worker;
pub mod wire;

pub use aggregate::Aggregate;
pub use drone::{Drone, Request, Responder};
pub use queen::{DispatchOptions, Queen, QueenBuilder, WorkerHandle};
pub use task_worker::{TaskRuntime, TaskWorker};
