// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it through `tracing` with typed fields at the
//! level that fits the event.
//!
//! # Organization
//!
//! * `queen` - hive management and fan-out dispatch events
//! * `drone` - worker-side routing and reply events
//! * `router` - topic router delivery events
//! * `codec` - serialization guard events
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_hive::observability::messages::queen::CommandDispatched;
//!
//! let msg = CommandDispatched {
//!     topic: "reverse_text",
//!     worker_count: 4,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use std::fmt::Display;
use tracing::Span;

pub mod codec;
pub mod drone;
pub mod queen;
pub mod router;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
