// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for hive operations.
//!
//! Covers argument validation, worker dispatch, reply delivery and the
//! optional timeout / cancel-on-remove behaviors. Silent hangs (a handler
//! that fails or never replies) are deliberately not represented here: the
//! coordinator cannot observe them.

use std::time::Duration;
use thiserror::Error;

use crate::engine::wire::{CorrelationId, WorkerId};
use crate::errors::CodecError;

/// Errors surfaced by the queen, drones and worker runtimes.
#[derive(Error, Debug)]
pub enum HiveError {
    /// A caller supplied an invalid argument. Always returned synchronously.
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Posting a command to a worker failed. The whole dispatch is aborted.
    #[error("Failed to dispatch to worker {worker}: {reason}")]
    DispatchFailed { worker: WorkerId, reason: String },

    /// The worker has been terminated and no longer accepts messages.
    #[error("Worker {0} has been terminated")]
    WorkerTerminated(WorkerId),

    /// The worker was removed while a reply was outstanding (cancel-on-remove only).
    #[error("Worker {worker} was removed before replying")]
    WorkerRemoved { worker: WorkerId },

    /// The dispatch did not complete within the requested duration.
    #[error("Command '{topic}' timed out after {after:?}")]
    Timeout { topic: String, after: Duration },

    /// A drone handler tried to reply twice to the same envelope.
    #[error("A reply was already sent for correlation id '{0}'")]
    AlreadyReplied(CorrelationId),

    /// The reply channel back to the queen is gone.
    #[error("Reply channel closed for correlation id '{0}'")]
    ReplyChannelClosed(CorrelationId),

    /// No drone source is registered under the given name.
    #[error("Unknown drone source: '{0}'")]
    UnknownSource(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type alias for hive operations.
pub type HiveResult<T> = Result<T, HiveError>;
