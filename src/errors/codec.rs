// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while moving values across the worker boundary.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),
}
