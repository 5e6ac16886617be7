// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::drone::Drone;
use crate::traits::{Command, CommandHandler};

/// Reverse `text` character by character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseText {
    pub text: String,
}

impl Command for ReverseText {
    const TOPIC: &'static str = "reverse_text";
    type Output = String;
}

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

pub fn install(drone: &mut Drone) -> Arc<dyn CommandHandler> {
    drone.on_command::<ReverseText, _, _>(|command| async move { Ok(reverse(&command.text)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("hello world"), "dlrow olleh");
        assert_eq!(reverse(""), "");
        assert_eq!(reverse("añb"), "bña");
    }
}
