// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for hive management and fan-out dispatch events.
//!
//! This module contains message types for logging events related to:
//! * Workers joining and leaving the hive
//! * Command dispatch lifecycle (dispatched, completed, aborted, timed out)
//! * Replies that arrive after their caller stopped waiting

use crate::engine::wire::WorkerId;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A worker was spawned and appended to the hive.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkerAdded<'a> {
    pub worker_id: WorkerId,
    pub source: &'a str,
    pub hive_size: usize,
}

impl Display for WorkerAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} added from source '{}': hive_size={}",
            self.worker_id, self.source, self.hive_size
        )
    }
}

impl StructuredLog for WorkerAdded<'_> {
    fn log(&self) {
        tracing::info!(
            worker_id = %self.worker_id,
            source = self.source,
            hive_size = self.hive_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "worker_added",
            span_name = name,
            worker_id = %self.worker_id,
            source = self.source,
            hive_size = self.hive_size,
        )
    }
}

/// A worker was removed from the hive and terminated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkerRemoved {
    pub worker_id: WorkerId,
    pub hive_size: usize,
    pub cancelled_replies: usize,
}

impl Display for WorkerRemoved {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} removed: hive_size={}, cancelled_replies={}",
            self.worker_id, self.hive_size, self.cancelled_replies
        )
    }
}

impl StructuredLog for WorkerRemoved {
    fn log(&self) {
        tracing::info!(
            worker_id = %self.worker_id,
            hive_size = self.hive_size,
            cancelled_replies = self.cancelled_replies,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "worker_removed",
            span_name = name,
            worker_id = %self.worker_id,
            hive_size = self.hive_size,
        )
    }
}

/// Every worker in the hive was terminated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HiveStopped {
    pub worker_count: usize,
}

impl Display for HiveStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Hive stopped: {} workers terminated", self.worker_count)
    }
}

impl StructuredLog for HiveStopped {
    fn log(&self) {
        tracing::info!(worker_count = self.worker_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "hive_stopped",
            span_name = name,
            worker_count = self.worker_count,
        )
    }
}

/// A command was issued while the hive had no workers.
///
/// # Log Level
/// `warn!` - The command is a no-op, which is rarely what the caller intended
///
/// # Example
/// ```
/// use the_hive::observability::messages::queen::EmptyHive;
///
/// let msg = EmptyHive { topic: "echo" };
/// assert!(msg.to_string().contains("no drones in the hive"));
/// ```
pub struct EmptyHive<'a> {
    pub topic: &'a str,
}

impl Display for EmptyHive<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "The queen issued command '{}', but there are no drones in the hive! Use `add_worker` to add one",
            self.topic
        )
    }
}

impl StructuredLog for EmptyHive<'_> {
    fn log(&self) {
        tracing::warn!(topic = self.topic, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("empty_hive", span_name = name, topic = self.topic)
    }
}

/// A command was posted to every worker in the hive.
///
/// # Log Level
/// `debug!` - Per-command event
pub struct CommandDispatched<'a> {
    pub topic: &'a str,
    pub worker_count: usize,
}

impl Display for CommandDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Command '{}' dispatched to {} workers",
            self.topic, self.worker_count
        )
    }
}

impl StructuredLog for CommandDispatched<'_> {
    fn log(&self) {
        tracing::debug!(
            topic = self.topic,
            worker_count = self.worker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "command",
            span_name = name,
            topic = self.topic,
            worker_count = self.worker_count,
        )
    }
}

/// Every worker replied and the aggregate was assembled.
///
/// # Log Level
/// `debug!` - Per-command event
pub struct CommandCompleted<'a> {
    pub topic: &'a str,
    pub worker_count: usize,
    pub duration: Duration,
}

impl Display for CommandCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Command '{}' completed: {} replies in {:?}",
            self.topic, self.worker_count, self.duration
        )
    }
}

impl StructuredLog for CommandCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            topic = self.topic,
            worker_count = self.worker_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "command_completed",
            span_name = name,
            topic = self.topic,
            worker_count = self.worker_count,
            duration = ?self.duration,
        )
    }
}

/// Posting to one worker failed, so the whole command was abandoned.
///
/// # Log Level
/// `error!` - The caller receives a failure
pub struct DispatchAborted<'a> {
    pub topic: &'a str,
    pub worker_id: WorkerId,
    pub error: &'a dyn std::error::Error,
}

impl Display for DispatchAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Command '{}' aborted: posting to worker {} failed: {}",
            self.topic, self.worker_id, self.error
        )
    }
}

impl StructuredLog for DispatchAborted<'_> {
    fn log(&self) {
        tracing::error!(
            topic = self.topic,
            worker_id = %self.worker_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "dispatch_aborted",
            span_name = name,
            topic = self.topic,
            worker_id = %self.worker_id,
            error = %self.error,
        )
    }
}

/// A command hit its timeout before every worker replied.
///
/// # Log Level
/// `warn!` - Only reachable when a timeout was requested
pub struct DispatchTimedOut<'a> {
    pub topic: &'a str,
    pub after: Duration,
    pub outstanding: usize,
}

impl Display for DispatchTimedOut<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Command '{}' timed out after {:?} with {} replies outstanding",
            self.topic, self.after, self.outstanding
        )
    }
}

impl StructuredLog for DispatchTimedOut<'_> {
    fn log(&self) {
        tracing::warn!(
            topic = self.topic,
            after_ms = self.after.as_millis() as u64,
            outstanding = self.outstanding,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "dispatch_timed_out",
            span_name = name,
            topic = self.topic,
            outstanding = self.outstanding,
        )
    }
}

/// A reply arrived for a correlation id nobody is waiting on.
///
/// # Log Level
/// `debug!` - Expected after a timeout or an aborted dispatch
pub struct StaleReply<'a> {
    pub correlation_id: &'a str,
}

impl Display for StaleReply<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropping reply for unknown correlation id '{}'",
            self.correlation_id
        )
    }
}

impl StructuredLog for StaleReply<'_> {
    fn log(&self) {
        tracing::debug!(correlation_id = self.correlation_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stale_reply",
            span_name = name,
            correlation_id = self.correlation_id,
        )
    }
}
