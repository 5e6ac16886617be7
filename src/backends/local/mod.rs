// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod programs;
pub mod registry;

pub use programs::*;
pub use registry::DroneRegistry;
