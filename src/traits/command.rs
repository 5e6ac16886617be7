// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{de::DeserializeOwned, Serialize};

/// A typed command bound to a wire topic.
///
/// The wire format stays topic-string based: a command is encoded into the
/// envelope payload and posted under [`TOPIC`](Command::TOPIC), and each
/// reply payload is decoded into [`Output`](Command::Output).
pub trait Command: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TOPIC: &'static str;

    type Output: Serialize + DeserializeOwned + Send + 'static;
}
