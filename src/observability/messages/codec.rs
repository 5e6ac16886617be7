// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The serialization guard could not round-trip a value and passed it through unchanged.
///
/// # Log Level
/// `debug!` - Best-effort step, the raw value is still delivered
pub struct GuardFallback<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for GuardFallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Serialization guard fell back to the raw value: {}",
            self.error
        )
    }
}

impl StructuredLog for GuardFallback<'_> {
    fn log(&self) {
        tracing::debug!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("guard_fallback", span_name = name, error = %self.error)
    }
}
