// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The worker primitive the queen is written against.
//!
//! A worker is an isolated execution context running one drone. The queen
//! only ever posts envelopes to it and reads replies from the channel handed
//! over at spawn time; nothing else is shared.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::wire::{Envelope, Reply, WorkerId};
use crate::errors::HiveError;
use crate::traits::DroneSource;

pub trait Worker: Send + Sync {
    fn id(&self) -> WorkerId;

    /// Hand an envelope to the worker without waiting for it to be handled.
    ///
    /// Fails synchronously once the worker can no longer accept messages.
    fn post_message(&self, envelope: Envelope) -> Result<(), HiveError>;

    /// Stop the worker. Replies still outstanding are never delivered.
    fn terminate(&self);

    fn is_terminated(&self) -> bool;
}

/// Creates workers from drone sources.
pub trait WorkerRuntime: Send + Sync {
    /// Start a worker running the drone built by `source`.
    ///
    /// Every reply the drone emits is sent on `replies`.
    fn spawn(
        &self,
        id: WorkerId,
        source: &dyn DroneSource,
        replies: UnboundedSender<Reply>,
    ) -> Result<Arc<dyn Worker>, HiveError>;
}
