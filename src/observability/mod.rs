// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the hive. Message types follow a struct-based pattern with a
//! `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between the text output and structured fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::queen` - hive management and fan-out dispatch events
//! * `messages::drone` - worker-side routing and reply events
//! * `messages::router` - topic router delivery events
//! * `messages::codec` - serialization guard events
//!
//! # Usage
//!
//! ```rust
//! use the_hive::observability::messages::{queen::EmptyHive, StructuredLog};
//!
//! let msg = EmptyHive { topic: "reverse_text" };
//!
//! msg.log();
//! ```

pub mod messages;
