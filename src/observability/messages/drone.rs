// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for worker-side routing and reply events.

use crate::engine::wire::WorkerId;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An envelope arrived for a topic with no registered handler; the drone
/// replies with `null` so the caller is not left waiting.
///
/// # Log Level
/// `debug!` - Expected when a hive mixes drone programs
pub struct NoHandlerRegistered<'a> {
    pub topic: &'a str,
    pub correlation_id: &'a str,
}

impl Display for NoHandlerRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No handler registered for topic '{}', replying null to '{}'",
            self.topic, self.correlation_id
        )
    }
}

impl StructuredLog for NoHandlerRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            topic = self.topic,
            correlation_id = self.correlation_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "no_handler",
            span_name = name,
            topic = self.topic,
            correlation_id = self.correlation_id,
        )
    }
}

/// A drone emitted its reply for one envelope.
///
/// # Log Level
/// `trace!` - Per-reply event
pub struct ReplySent<'a> {
    pub correlation_id: &'a str,
}

impl Display for ReplySent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Reply sent for '{}'", self.correlation_id)
    }
}

impl StructuredLog for ReplySent<'_> {
    fn log(&self) {
        tracing::trace!(correlation_id = self.correlation_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "reply_sent",
            span_name = name,
            correlation_id = self.correlation_id,
        )
    }
}

/// A drone task could not hand its reply back to the queen.
///
/// # Log Level
/// `warn!` - The matching dispatch will never complete
pub struct ReplyDropped<'a> {
    pub correlation_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ReplyDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reply for '{}' dropped: {}",
            self.correlation_id, self.error
        )
    }
}

impl StructuredLog for ReplyDropped<'_> {
    fn log(&self) {
        tracing::warn!(
            correlation_id = self.correlation_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "reply_dropped",
            span_name = name,
            correlation_id = self.correlation_id,
        )
    }
}

/// A drone task panicked while handling an envelope.
///
/// # Log Level
/// `error!` - Treated like a failed handler: no reply is emitted
pub struct DroneTaskPanicked {
    pub worker_id: WorkerId,
}

impl Display for DroneTaskPanicked {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Handler task on worker {} panicked", self.worker_id)
    }
}

impl StructuredLog for DroneTaskPanicked {
    fn log(&self) {
        tracing::error!(worker_id = %self.worker_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "drone_task_panicked",
            span_name = name,
            worker_id = %self.worker_id,
        )
    }
}
