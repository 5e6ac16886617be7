// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::drone::Drone;
use crate::engine::task_worker::TaskRuntime;
use crate::engine::wire::{Envelope, Reply, WorkerId};
use crate::errors::HiveError;
use crate::traits::{source_fn, DroneSource, Worker, WorkerRuntime};

/// A worker whose mailbox always refuses envelopes
pub struct RejectingWorker {
    id: WorkerId,
}

impl Worker for RejectingWorker {
    fn id(&self) -> WorkerId {
        self.id
    }

    fn post_message(&self, _envelope: Envelope) -> Result<(), HiveError> {
        Err(HiveError::WorkerTerminated(self.id))
    }

    fn terminate(&self) {}

    fn is_terminated(&self) -> bool {
        true
    }
}

/// A worker that accepts every envelope and never replies
pub struct SilentWorker {
    id: WorkerId,
    received: Arc<AtomicUsize>,
    terminated: AtomicBool,
}

impl Worker for SilentWorker {
    fn id(&self) -> WorkerId {
        self.id
    }

    fn post_message(&self, _envelope: Envelope) -> Result<(), HiveError> {
        self.received.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn terminate(&self) {
        self.terminated.store(true, Ordering::SeqCst);
    }

    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

/// Runtime handing out task workers, except at the spawn positions marked
/// as rejecting or silent (counted from zero).
#[derive(Default)]
pub struct StubRuntime {
    rejecting: HashSet<usize>,
    silent: HashSet<usize>,
    spawned: AtomicUsize,
    pub silent_received: Arc<AtomicUsize>,
}

impl StubRuntime {
    pub fn rejecting_at(mut self, position: usize) -> Self {
        self.rejecting.insert(position);
        self
    }

    pub fn silent_at(mut self, position: usize) -> Self {
        self.silent.insert(position);
        self
    }
}

impl WorkerRuntime for StubRuntime {
    fn spawn(
        &self,
        id: WorkerId,
        source: &dyn DroneSource,
        replies: UnboundedSender<Reply>,
    ) -> Result<Arc<dyn Worker>, HiveError> {
        let position = self.spawned.fetch_add(1, Ordering::SeqCst);
        if self.rejecting.contains(&position) {
            return Ok(Arc::new(RejectingWorker { id }));
        }
        if self.silent.contains(&position) {
            return Ok(Arc::new(SilentWorker {
                id,
                received: Arc::clone(&self.silent_received),
                terminated: AtomicBool::new(false),
            }));
        }
        TaskRuntime.spawn(id, source, replies)
    }
}

/// Source whose every drone echoes the payload back
pub fn echo_source() -> impl DroneSource {
    source_fn("stub_echo", || {
        let mut drone = Drone::new();
        drone.on_fn("echo", |request, responder| async move {
            responder.send(request.payload)?;
            Ok(())
        });
        drone
    })
}

/// Source whose n-th built drone replies to `index` with n
pub fn indexed_source() -> impl DroneSource {
    let built = AtomicUsize::new(0);
    source_fn("stub_indexed", move || {
        let index = built.fetch_add(1, Ordering::SeqCst);
        let mut drone = Drone::new();
        drone.on_fn("index", move |_, responder| async move {
            responder.send(index.into())?;
            Ok(())
        });
        drone
    })
}

/// Source whose drones fail every command
pub fn failing_source() -> impl DroneSource {
    source_fn("stub_failing", || {
        let mut drone = Drone::new();
        drone.on_fn("echo", |_, _| async move { anyhow::bail!("simulated failure") });
        drone
    })
}
