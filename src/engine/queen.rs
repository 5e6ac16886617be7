// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Coordinator side of the hive.
//!
//! The queen owns an ordered pool of workers. A dispatch posts one envelope
//! per worker, each tagged with a fresh correlation id, and resolves once
//! every worker has replied. Replies are routed back through a
//! [`TopicRouter`] keyed by correlation id: each waiter fires once and is
//! deregistered straight after.
//!
//! ```text
//! dispatch ──▶ guard payload ──▶ for each worker (hive order):
//!                                    register waiter(correlation id)
//!                                    post envelope ── fails? abort whole call
//!          ◀── Aggregate ◀── join all waiters (hive order)
//! ```
//!
//! By default a dispatch waits indefinitely: a worker whose handler fails,
//! never sends, or is removed mid-flight leaves the call pending. A per-call
//! timeout and cancel-on-remove are available as opt-ins through
//! [`QueenBuilder`].

use futures::future::try_join_all;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::codec;
use crate::config::consts::DEFAULT_CORRELATION_ID_LENGTH;
use crate::engine::aggregate::Aggregate;
use crate::engine::task_worker::TaskRuntime;
use crate::engine::wire::{CorrelationId, Envelope, Reply, WorkerId};
use crate::errors::{HiveError, HiveResult};
use crate::observability::messages::{
    queen::{
        CommandCompleted, CommandDispatched, DispatchAborted, DispatchTimedOut, EmptyHive,
        HiveStopped, StaleReply, WorkerAdded, WorkerRemoved,
    },
    StructuredLog,
};
use crate::routing::TopicRouter;
use crate::traits::{Command, DroneSource, Worker, WorkerRuntime};
use crate::utils::KeyGenerator;

/// Handle to one worker in a queen's hive.
///
/// Two handles are the same worker when their ids match.
#[derive(Clone)]
pub struct WorkerHandle {
    worker: Arc<dyn Worker>,
    source: Arc<str>,
}

impl WorkerHandle {
    pub fn id(&self) -> WorkerId {
        self.worker.id()
    }

    /// Name of the drone source this worker was spawned from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Terminate the worker without removing it from the hive.
    ///
    /// Later dispatches fail fast when they reach it.
    pub fn terminate(&self) {
        self.worker.terminate();
    }

    pub fn is_terminated(&self) -> bool {
        self.worker.is_terminated()
    }

    fn post(&self, envelope: Envelope) -> HiveResult<()> {
        self.worker.post_message(envelope)
    }
}

impl PartialEq for WorkerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for WorkerHandle {}

impl fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("id", &self.id())
            .field("source", &self.source)
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

/// Per-queen dispatch behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    pub correlation_id_length: usize,
    /// Default deadline for [`Queen::dispatch`]. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Fail outstanding replies of a worker when it is removed.
    pub cancel_on_remove: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            correlation_id_length: DEFAULT_CORRELATION_ID_LENGTH,
            timeout: None,
            cancel_on_remove: false,
        }
    }
}

/// One-shot slot resolved by the reply carrying its correlation id.
pub(crate) struct ReplyWaiter {
    worker: WorkerId,
    slot: std::sync::Mutex<Option<oneshot::Sender<Value>>>,
}

impl ReplyWaiter {
    fn new(worker: WorkerId, sender: oneshot::Sender<Value>) -> Self {
        Self {
            worker,
            slot: std::sync::Mutex::new(Some(sender)),
        }
    }

    fn take(&self) -> Option<oneshot::Sender<Value>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn fire(&self, payload: Value) -> anyhow::Result<()> {
        let Some(sender) = self.take() else {
            anyhow::bail!("reply for worker {} was already delivered", self.worker);
        };
        sender
            .send(payload)
            .map_err(|_| anyhow::anyhow!("dispatch waiting on worker {} has gone away", self.worker))
    }

    /// Drop the sender so the waiting dispatch observes a closed slot.
    fn cancel(&self) {
        self.take();
    }
}

type ReplyRoutes = Arc<Mutex<TopicRouter<ReplyWaiter>>>;

/// Builder for [`Queen`].
///
/// ```
/// use std::time::Duration;
/// use the_hive::engine::queen::Queen;
///
/// let queen = Queen::builder()
///     .with_seed(42)
///     .with_timeout(Duration::from_secs(5))
///     .cancel_on_remove(true)
///     .build();
///
/// assert!(queen.options().cancel_on_remove);
/// ```
pub struct QueenBuilder {
    runtime: Arc<dyn WorkerRuntime>,
    keys: KeyGenerator,
    options: DispatchOptions,
}

impl QueenBuilder {
    pub fn new() -> Self {
        Self {
            runtime: Arc::new(TaskRuntime),
            keys: KeyGenerator::new(),
            options: DispatchOptions::default(),
        }
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn WorkerRuntime>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Seed correlation id generation for reproducible ids.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.keys.seed(seed);
        self
    }

    pub fn with_charset(mut self, charset: &str) -> HiveResult<Self> {
        self.keys = self.keys.with_charset(charset)?;
        Ok(self)
    }

    pub fn with_correlation_id_length(mut self, length: usize) -> HiveResult<Self> {
        if length == 0 {
            return Err(HiveError::Validation(
                "correlation id length must be a positive integer".to_string(),
            ));
        }
        self.options.correlation_id_length = length;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn cancel_on_remove(mut self, enabled: bool) -> Self {
        self.options.cancel_on_remove = enabled;
        self
    }

    pub fn build(self) -> Queen {
        Queen {
            hive: Mutex::new(Vec::new()),
            keys: Mutex::new(self.keys),
            routes: Arc::new(Mutex::new(TopicRouter::new())),
            runtime: self.runtime,
            options: self.options,
            next_worker_id: AtomicU64::new(1),
        }
    }
}

impl Default for QueenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fan-out command dispatcher over a pool of drones.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use the_hive::engine::{aggregate::Aggregate, drone::Drone, queen::Queen};
/// use the_hive::traits::source_fn;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), the_hive::errors::HiveError> {
/// let echo = source_fn("echo", || {
///     let mut drone = Drone::new();
///     drone.on_fn("echo", |request, responder| async move {
///         responder.send(request.payload)?;
///         Ok(())
///     });
///     drone
/// });
///
/// let queen = Queen::new();
/// queen.add_workers(&echo, 2).await?;
///
/// let replies = queen.dispatch("echo", json!("hi")).await?;
/// assert_eq!(replies, Some(Aggregate::Many(vec![json!("hi"), json!("hi")])));
///
/// queen.kill().await;
/// # Ok(())
/// # }
/// ```
pub struct Queen {
    hive: Mutex<Vec<WorkerHandle>>,
    keys: Mutex<KeyGenerator>,
    routes: ReplyRoutes,
    runtime: Arc<dyn WorkerRuntime>,
    options: DispatchOptions,
    next_worker_id: AtomicU64,
}

impl Queen {
    pub fn new() -> Self {
        QueenBuilder::new().build()
    }

    /// A default queen with `count` workers of `source` already in the hive.
    ///
    /// ```
    /// use serde_json::json;
    /// use the_hive::backends::local::programs::echo_drone;
    /// use the_hive::engine::{Aggregate, Queen};
    /// use the_hive::traits::source_fn;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), the_hive::errors::HiveError> {
    /// let queen = Queen::with_workers(&source_fn("echo", echo_drone), 2).await?;
    ///
    /// let replies = queen.dispatch("echo", json!("hi")).await?;
    /// assert_eq!(replies, Some(Aggregate::Many(vec![json!("hi"), json!("hi")])));
    /// queen.kill().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_workers(source: &dyn DroneSource, count: usize) -> HiveResult<Self> {
        let queen = Self::new();
        queen.add_workers(source, count).await?;
        Ok(queen)
    }

    pub fn builder() -> QueenBuilder {
        QueenBuilder::new()
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Spawn one worker from `source` and append it to the hive.
    pub async fn add_worker(&self, source: &dyn DroneSource) -> HiveResult<WorkerHandle> {
        let id = WorkerId::new(self.next_worker_id.fetch_add(1, Ordering::Relaxed));
        let (replies, inbound) = mpsc::unbounded_channel();

        let worker = self.runtime.spawn(id, source, replies)?;
        tokio::spawn(pump_replies(Arc::clone(&self.routes), inbound));

        let handle = WorkerHandle {
            worker,
            source: Arc::from(source.name()),
        };

        let hive_size = {
            let mut hive = self.hive.lock().await;
            hive.push(handle.clone());
            hive.len()
        };

        WorkerAdded {
            worker_id: id,
            source: source.name(),
            hive_size,
        }
        .log();

        Ok(handle)
    }

    /// Spawn `count` workers from `source`.
    pub async fn add_workers(
        &self,
        source: &dyn DroneSource,
        count: usize,
    ) -> HiveResult<Vec<WorkerHandle>> {
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            handles.push(self.add_worker(source).await?);
        }
        Ok(handles)
    }

    /// Remove a worker from the hive and terminate it.
    ///
    /// Returns `false` if the worker is not in this hive. Replies the worker
    /// still owes are abandoned; with cancel-on-remove enabled the dispatches
    /// waiting on them fail with [`HiveError::WorkerRemoved`], otherwise they
    /// keep waiting.
    pub async fn remove_worker(&self, handle: &WorkerHandle) -> bool {
        let (removed, hive_size) = {
            let mut hive = self.hive.lock().await;
            let Some(position) = hive.iter().position(|worker| worker == handle) else {
                return false;
            };
            let removed = hive.remove(position);
            (removed, hive.len())
        };

        removed.terminate();

        let cancelled_replies = if self.options.cancel_on_remove {
            let worker_id = removed.id();
            self.routes.lock().await.retain(|_, waiter| {
                if waiter.worker == worker_id {
                    waiter.cancel();
                    false
                } else {
                    true
                }
            })
        } else {
            0
        };

        WorkerRemoved {
            worker_id: removed.id(),
            hive_size,
            cancelled_replies,
        }
        .log();

        true
    }

    pub async fn remove_workers(&self, handles: &[WorkerHandle]) {
        for handle in handles {
            self.remove_worker(handle).await;
        }
    }

    /// Send `topic` with `payload` to every worker and collect their replies.
    ///
    /// Resolves to `Ok(None)` when the hive is empty, to
    /// [`Aggregate::Single`] for one worker and to [`Aggregate::Many`] in hive
    /// order otherwise. If posting to any worker fails the whole call fails
    /// with [`HiveError::DispatchFailed`].
    pub async fn dispatch(&self, topic: &str, payload: Value) -> HiveResult<Option<Aggregate<Value>>> {
        self.fan_out(topic, payload, self.options.timeout).await
    }

    /// Alias of [`dispatch`](Queen::dispatch).
    pub async fn command(&self, topic: &str, payload: Value) -> HiveResult<Option<Aggregate<Value>>> {
        self.dispatch(topic, payload).await
    }

    /// Alias of [`dispatch`](Queen::dispatch).
    pub async fn run(&self, topic: &str, payload: Value) -> HiveResult<Option<Aggregate<Value>>> {
        self.dispatch(topic, payload).await
    }

    /// Like [`dispatch`](Queen::dispatch), failing with [`HiveError::Timeout`]
    /// if not every reply arrives within `after`.
    pub async fn dispatch_with_timeout(
        &self,
        topic: &str,
        payload: Value,
        after: Duration,
    ) -> HiveResult<Option<Aggregate<Value>>> {
        if after.is_zero() {
            return Err(HiveError::Validation(
                "dispatch timeout must be greater than zero".to_string(),
            ));
        }
        self.fan_out(topic, payload, Some(after)).await
    }

    /// Typed dispatch: encodes `command`, posts it under `C::TOPIC` and
    /// decodes every reply into `C::Output`.
    pub async fn dispatch_command<C: Command>(
        &self,
        command: &C,
    ) -> HiveResult<Option<Aggregate<C::Output>>> {
        let payload = codec::encode(command)?;
        let Some(replies) = self.dispatch(C::TOPIC, payload).await? else {
            return Ok(None);
        };
        Ok(Some(replies.try_map(codec::decode::<C::Output>)?))
    }

    async fn fan_out(
        &self,
        topic: &str,
        payload: Value,
        timeout: Option<Duration>,
    ) -> HiveResult<Option<Aggregate<Value>>> {
        let started = Instant::now();
        let workers = self.workers().await;
        if workers.is_empty() {
            EmptyHive { topic }.log();
            return Ok(None);
        }

        let payload = codec::guard(payload);
        let correlation_ids = {
            let mut keys = self.keys.lock().await;
            workers
                .iter()
                .map(|_| keys.correlation_id(self.options.correlation_id_length))
                .collect::<HiveResult<Vec<_>>>()?
        };

        let mut registered = Vec::with_capacity(workers.len());
        let mut pending = Vec::with_capacity(workers.len());

        for (worker, correlation_id) in workers.iter().zip(correlation_ids) {
            let (sender, receiver) = oneshot::channel();
            let waiter = Arc::new(ReplyWaiter::new(worker.id(), sender));
            self.routes
                .lock()
                .await
                .register(correlation_id.as_str(), Arc::clone(&waiter));
            registered.push((correlation_id.clone(), waiter));

            let envelope = Envelope {
                topic: topic.to_string(),
                payload: payload.clone(),
                correlation_id,
            };

            if let Err(err) = worker.post(envelope) {
                DispatchAborted {
                    topic,
                    worker_id: worker.id(),
                    error: &err,
                }
                .log();
                self.abandon(&registered).await;
                return Err(HiveError::DispatchFailed {
                    worker: worker.id(),
                    reason: err.to_string(),
                });
            }

            pending.push((worker.id(), receiver));
        }

        CommandDispatched {
            topic,
            worker_count: workers.len(),
        }
        .log();

        let join = try_join_all(pending.into_iter().map(|(worker, receiver)| async move {
            receiver
                .await
                .map_err(|_| HiveError::WorkerRemoved { worker })
        }));

        let joined = match timeout {
            None => join.await,
            Some(after) => match tokio::time::timeout(after, join).await {
                Ok(joined) => joined,
                Err(_) => {
                    let outstanding = self.abandon(&registered).await;
                    DispatchTimedOut {
                        topic,
                        after,
                        outstanding,
                    }
                    .log();
                    return Err(HiveError::Timeout {
                        topic: topic.to_string(),
                        after,
                    });
                }
            },
        };

        let replies = match joined {
            Ok(replies) => replies,
            Err(err) => {
                self.abandon(&registered).await;
                return Err(err);
            }
        };

        CommandCompleted {
            topic,
            worker_count: replies.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(Some(Aggregate::from_ordered(replies)))
    }

    /// Deregister and close the waiters of an unfinished dispatch.
    ///
    /// Returns how many were still waiting for a reply.
    async fn abandon(&self, registered: &[(CorrelationId, Arc<ReplyWaiter>)]) -> usize {
        let mut routes = self.routes.lock().await;
        let mut outstanding = 0;
        for (correlation_id, waiter) in registered {
            waiter.cancel();
            if routes.deregister(correlation_id.as_str(), waiter) {
                outstanding += 1;
            }
        }
        outstanding
    }

    /// Terminate every worker. Workers stay in the hive.
    pub async fn stop(&self) {
        let hive = self.hive.lock().await;
        for worker in hive.iter() {
            worker.terminate();
        }
        HiveStopped {
            worker_count: hive.len(),
        }
        .log();
    }

    /// Alias of [`stop`](Queen::stop).
    pub async fn terminate(&self) {
        self.stop().await;
    }

    /// Terminate and remove every worker.
    pub async fn kill(&self) {
        self.stop().await;
        let workers = self.workers().await;
        self.remove_workers(&workers).await;
    }

    pub async fn len(&self) -> usize {
        self.hive.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hive.lock().await.is_empty()
    }

    /// Snapshot of the hive in order.
    pub async fn workers(&self) -> Vec<WorkerHandle> {
        self.hive.lock().await.clone()
    }

    /// Number of replies currently awaited across all dispatches.
    pub async fn pending_replies(&self) -> usize {
        self.routes.lock().await.topic_count()
    }
}

impl Default for Queen {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Queen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queen")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Route every reply from one worker to the waiter registered for its
/// correlation id, then drop that waiter.
async fn pump_replies(routes: ReplyRoutes, mut inbound: mpsc::UnboundedReceiver<Reply>) {
    while let Some(reply) = inbound.recv().await {
        let mut routes = routes.lock().await;
        let waiters = routes.handlers(&reply.topic);
        if waiters.is_empty() {
            StaleReply {
                correlation_id: &reply.topic,
            }
            .log();
            continue;
        }

        routes.dispatch(&reply.topic, |waiter| waiter.fire(reply.payload.clone()));
        for waiter in &waiters {
            routes.deregister(&reply.topic, waiter);
        }
    }
}
