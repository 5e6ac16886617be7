// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Default worker runtime: one tokio task per worker.
//!
//! Each worker task owns its drone and an inbox channel. Every envelope is
//! handled in its own task inside a `JoinSet`, so a slow handler never holds
//! up later envelopes. Termination cancels the worker task, which aborts
//! every handler still in flight.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::engine::drone::Drone;
use crate::engine::wire::{Envelope, Reply, WorkerId};
use crate::errors::HiveError;
use crate::observability::messages::{drone::DroneTaskPanicked, StructuredLog};
use crate::traits::{DroneSource, Worker, WorkerRuntime};

/// Spawns [`TaskWorker`]s on the current tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskRuntime;

impl WorkerRuntime for TaskRuntime {
    fn spawn(
        &self,
        id: WorkerId,
        source: &dyn DroneSource,
        replies: UnboundedSender<Reply>,
    ) -> Result<Arc<dyn Worker>, HiveError> {
        let drone = Arc::new(source.build()?);
        Ok(Arc::new(TaskWorker::start(id, drone, replies)))
    }
}

/// A worker running its drone on a dedicated tokio task.
///
/// Dropping the last handle terminates the worker.
#[derive(Debug)]
pub struct TaskWorker {
    id: WorkerId,
    inbox: UnboundedSender<Envelope>,
    cancel: CancellationToken,
}

impl TaskWorker {
    pub fn start(id: WorkerId, drone: Arc<Drone>, replies: UnboundedSender<Reply>) -> Self {
        let (inbox, messages) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        tokio::spawn(run_drone(id, drone, messages, replies, cancel.clone()));

        Self { id, inbox, cancel }
    }
}

impl Worker for TaskWorker {
    fn id(&self) -> WorkerId {
        self.id
    }

    fn post_message(&self, envelope: Envelope) -> Result<(), HiveError> {
        if self.cancel.is_cancelled() {
            return Err(HiveError::WorkerTerminated(self.id));
        }
        self.inbox
            .send(envelope)
            .map_err(|_| HiveError::WorkerTerminated(self.id))
    }

    fn terminate(&self) {
        self.cancel.cancel();
    }

    fn is_terminated(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for TaskWorker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_drone(
    id: WorkerId,
    drone: Arc<Drone>,
    mut messages: UnboundedReceiver<Envelope>,
    replies: UnboundedSender<Reply>,
    cancel: CancellationToken,
) {
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = messages.recv() => match next {
                Some(envelope) => {
                    let drone = Arc::clone(&drone);
                    let replies = replies.clone();
                    in_flight.spawn(async move { drone.receive(envelope, replies).await });
                }
                None => break,
            },
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(err) = joined {
                    if err.is_panic() {
                        DroneTaskPanicked { worker_id: id }.log();
                    }
                }
            }
        }
    }

    in_flight.abort_all();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::wire::CorrelationId;
    use serde_json::json;
    use std::time::Duration;

    fn echo_drone() -> Arc<Drone> {
        let mut drone = Drone::new();
        drone.on_fn("echo", |request, responder| async move {
            responder.send(request.payload)?;
            Ok(())
        });
        Arc::new(drone)
    }

    fn envelope(id: &str, payload: serde_json::Value) -> Envelope {
        Envelope {
            topic: "echo".to_string(),
            payload,
            correlation_id: CorrelationId::new(id),
        }
    }

    #[tokio::test]
    async fn test_posted_envelope_is_answered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = TaskWorker::start(WorkerId::new(1), echo_drone(), tx);

        worker.post_message(envelope("c1", json!("hi"))).unwrap();

        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.topic, "c1");
        assert_eq!(reply.payload, json!("hi"));
    }

    #[tokio::test]
    async fn test_post_after_terminate_fails_synchronously() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let worker = TaskWorker::start(WorkerId::new(2), echo_drone(), tx);

        worker.terminate();

        assert!(worker.is_terminated());
        let result = worker.post_message(envelope("c2", json!(null)));
        assert!(matches!(result, Err(HiveError::WorkerTerminated(id)) if id == WorkerId::new(2)));
    }

    #[tokio::test]
    async fn test_terminate_aborts_in_flight_handlers() {
        let mut drone = Drone::new();
        drone.on_fn("echo", |request, responder| async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            responder.send(request.payload)?;
            Ok(())
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = TaskWorker::start(WorkerId::new(3), Arc::new(drone), tx);

        worker.post_message(envelope("c3", json!(1))).unwrap();
        tokio::task::yield_now().await;
        worker.terminate();

        // Once the worker task and its handlers are gone the channel closes.
        let closed = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }

    #[tokio::test]
    async fn test_slow_handler_does_not_block_later_envelopes() {
        let mut drone = Drone::new();
        drone.on_fn("echo", |request, responder| async move {
            if request.payload == json!("slow") {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            responder.send(request.payload)?;
            Ok(())
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = TaskWorker::start(WorkerId::new(4), Arc::new(drone), tx);

        worker.post_message(envelope("slow", json!("slow"))).unwrap();
        worker.post_message(envelope("fast", json!("fast"))).unwrap();

        let reply = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.topic, "fast");
    }
}
