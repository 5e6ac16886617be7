// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in drone programs.
//!
//! Each program is a typed [`Command`](crate::traits::Command) plus an
//! `install` function that subscribes its handler on a drone.

pub mod change_text_case;
pub mod echo;
pub mod reverse_text;
pub mod sum;
pub mod token_counter;

pub use change_text_case::{ChangeTextCase, TextCase};
pub use echo::Echo;
pub use reverse_text::ReverseText;
pub use sum::Sum;
pub use token_counter::{CountTokens, TokenCounts};

use crate::engine::drone::Drone;

/// Drone answering `echo` only.
pub fn echo_drone() -> Drone {
    let mut drone = Drone::new();
    echo::install(&mut drone);
    drone
}

/// Drone answering every built-in text and arithmetic command.
pub fn text_tools_drone() -> Drone {
    let mut drone = Drone::new();
    echo::install(&mut drone);
    reverse_text::install(&mut drone);
    change_text_case::install(&mut drone);
    token_counter::install(&mut drone);
    sum::install(&mut drone);
    drone
}
