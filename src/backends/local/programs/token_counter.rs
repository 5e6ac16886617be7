// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::drone::Drone;
use crate::traits::{Command, CommandHandler};

/// Count characters, words and lines in `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTokens {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
}

impl Command for CountTokens {
    const TOPIC: &'static str = "count_tokens";
    type Output = TokenCounts;
}

pub fn count_tokens(text: &str) -> TokenCounts {
    TokenCounts {
        char_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        // An empty text still counts as one line
        line_count: text.lines().count().max(1),
    }
}

pub fn install(drone: &mut Drone) -> Arc<dyn CommandHandler> {
    drone.on_command::<CountTokens, _, _>(|command| async move { Ok(count_tokens(&command.text)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let counts = count_tokens("hello world\nsecond line here");

        assert_eq!(
            counts,
            TokenCounts {
                char_count: 28,
                word_count: 5,
                line_count: 2,
            }
        );
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(count_tokens(""), TokenCounts { char_count: 0, word_count: 0, line_count: 1 });
    }
}
