// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // drone sources and built-in programs
pub mod codec;      // serialization guard
pub mod config;     // config + hive builder
pub mod engine;     // queen, drones, worker runtime
pub mod errors;     // error handling
pub mod observability;
pub mod routing;    // topic router
pub mod traits;     // unified abstractions
pub mod utils;      // correlation ids
