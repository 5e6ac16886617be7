// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A handler returned an error; delivery continues with the next handler.
///
/// # Log Level
/// `warn!` - The handler's own caller sees nothing
///
/// # Example
/// ```
/// use the_hive::observability::messages::router::HandlerFailed;
///
/// let error = anyhow::anyhow!("boom");
/// let msg = HandlerFailed {
///     topic: "reverse_text",
///     error: &error,
/// };
///
/// assert_eq!(msg.to_string(), "Handler for topic 'reverse_text' failed: boom");
/// ```
pub struct HandlerFailed<'a> {
    pub topic: &'a str,
    pub error: &'a dyn Display,
}

impl Display for HandlerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Handler for topic '{}' failed: {}", self.topic, self.error)
    }
}

impl StructuredLog for HandlerFailed<'_> {
    fn log(&self) {
        tracing::warn!(topic = self.topic, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "handler_failed",
            span_name = name,
            topic = self.topic,
            error = %self.error,
        )
    }
}
