// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::drone::Drone;
use crate::traits::{Command, CommandHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Upper,
    Lower,
    /// First letter of every word capitalized.
    Proper,
    /// Like `Proper`, but short articles, conjunctions and prepositions stay
    /// lowercase after the first word.
    Title,
}

/// Convert `text` to the requested case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeTextCase {
    pub text: String,
    pub case: TextCase,
}

impl Command for ChangeTextCase {
    const TOPIC: &'static str = "change_text_case";
    type Output = String;
}

const MINOR_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

pub fn change_case(text: &str, case: TextCase) -> String {
    match case {
        TextCase::Upper => text.to_uppercase(),
        TextCase::Lower => text.to_lowercase(),
        TextCase::Proper => text
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        TextCase::Title => text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                let lower = word.to_lowercase();
                if i > 0 && MINOR_WORDS.contains(&lower.as_str()) {
                    lower
                } else {
                    capitalize(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

pub fn install(drone: &mut Drone) -> Arc<dyn CommandHandler> {
    drone.on_command::<ChangeTextCase, _, _>(|command| async move {
        Ok(change_case(&command.text, command.case))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(change_case("Hello World", TextCase::Upper), "HELLO WORLD");
        assert_eq!(change_case("Hello World", TextCase::Lower), "hello world");
    }

    #[test]
    fn test_proper_case() {
        assert_eq!(
            change_case("the QUICK brown fox", TextCase::Proper),
            "The Quick Brown Fox"
        );
    }

    #[test]
    fn test_title_case_keeps_minor_words_lowercase() {
        assert_eq!(
            change_case("the lord OF the rings", TextCase::Title),
            "The Lord of the Rings"
        );
    }

    #[test]
    fn test_command_wire_shape() {
        let command: ChangeTextCase =
            serde_json::from_value(json!({"text": "abc", "case": "upper"})).unwrap();

        assert_eq!(command.case, TextCase::Upper);
    }
}
