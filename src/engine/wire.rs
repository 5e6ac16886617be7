// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message shapes exchanged between the queen and her workers.
//!
//! ```text
//! Queen  -> Worker: { "topic": "<topic>",          "payload": ..., "correlationId": "<id>" }
//! Worker -> Queen:  { "topic": "<correlationId>",  "payload": ... }
//! ```
//!
//! A reply's `topic` is always the correlation id of the envelope it answers,
//! never the original command topic. The queen routes replies by that id
//! exactly the way drones route commands by topic.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One-shot random token linking a posted envelope to its reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CorrelationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of one worker within a queen's hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(u64);

impl WorkerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Command posted by the queen to one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub topic: String,
    pub payload: Value,
    pub correlation_id: CorrelationId,
}

/// Answer posted by a worker back to the queen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// The correlation id of the envelope being answered.
    pub topic: String,
    pub payload: Value,
}

impl Reply {
    pub fn new(correlation_id: &CorrelationId, payload: Value) -> Self {
        Self {
            topic: correlation_id.to_string(),
            payload,
        }
    }
}
