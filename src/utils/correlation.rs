// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Random correlation-id generation.
//!
//! Every dispatched call is tagged with a fresh random key. The generator owns
//! an explicit RNG state, so tests (or a configured seed) get reproducible
//! sequences without touching any process-wide state.
//!
//! No uniqueness registry is consulted before a key is handed out. With the
//! default 32 characters over a 62-symbol alphabet a collision between two
//! in-flight calls is negligible, but not impossible; that risk is accepted.

use crate::config::consts::{ALPHANUMERIC_CHARSET, DEFAULT_CORRELATION_ID_LENGTH};
use crate::engine::wire::CorrelationId;
use crate::errors::HiveError;

/// Seedable generator for fixed-length random keys.
///
/// # Examples
///
/// ```
/// use the_hive::utils::KeyGenerator;
///
/// let mut a = KeyGenerator::with_seed(7);
/// let mut b = KeyGenerator::with_seed(7);
///
/// let key = a.generate(16)?;
/// assert_eq!(key.len(), 16);
/// assert_eq!(key, b.generate(16)?);
/// # Ok::<(), the_hive::errors::HiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    rng: fastrand::Rng,
    charset: Vec<char>,
}

impl KeyGenerator {
    /// Generator seeded from entropy, drawing from the alphanumeric charset.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            charset: ALPHANUMERIC_CHARSET.chars().collect(),
        }
    }

    /// Deterministic generator: the same seed yields the same key sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            charset: ALPHANUMERIC_CHARSET.chars().collect(),
        }
    }

    /// Replace the charset keys are drawn from.
    pub fn with_charset(mut self, charset: &str) -> Result<Self, HiveError> {
        if charset.is_empty() {
            return Err(HiveError::Validation(
                "`charset` must contain at least one character".to_string(),
            ));
        }
        self.charset = charset.chars().collect();
        Ok(self)
    }

    /// Reseed the generator in place.
    pub fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    pub fn charset(&self) -> String {
        self.charset.iter().collect()
    }

    /// Produce a key of exactly `length` characters drawn uniformly from the charset.
    pub fn generate(&mut self, length: usize) -> Result<String, HiveError> {
        if length == 0 {
            return Err(HiveError::Validation(
                "`length` must be a positive integer".to_string(),
            ));
        }

        let charset = &self.charset;
        let rng = &mut self.rng;
        Ok((0..length)
            .map(|_| charset[rng.usize(..charset.len())])
            .collect())
    }

    pub fn correlation_id(&mut self, length: usize) -> Result<CorrelationId, HiveError> {
        self.generate(length).map(CorrelationId::from)
    }

    /// Correlation id of the default length.
    pub fn next_correlation_id(&mut self) -> Result<CorrelationId, HiveError> {
        self.correlation_id(DEFAULT_CORRELATION_ID_LENGTH)
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::LEGACY_CHARSET;
    use std::collections::HashSet;

    #[test]
    fn test_generate_exact_length_from_charset() {
        let mut keys = KeyGenerator::with_seed(1).with_charset("xyz").unwrap();

        let key = keys.generate(64).unwrap();

        assert_eq!(key.chars().count(), 64);
        assert!(key.chars().all(|c| "xyz".contains(c)));
    }

    #[test]
    fn test_seeded_generators_are_deterministic() {
        let mut first = KeyGenerator::with_seed(42);
        let mut second = KeyGenerator::with_seed(42);

        let a: Vec<String> = (0..5).map(|_| first.generate(20).unwrap()).collect();
        let b: Vec<String> = (0..5).map(|_| second.generate(20).unwrap()).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_reseeding_restarts_the_sequence() {
        let mut keys = KeyGenerator::with_seed(9);
        let first = keys.generate(12).unwrap();

        keys.seed(9);

        assert_eq!(keys.generate(12).unwrap(), first);
    }

    #[test]
    fn test_ten_thousand_ids_do_not_collide() {
        let mut keys = KeyGenerator::with_seed(2025);
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            assert!(seen.insert(keys.generate(16).unwrap()));
        }
    }

    #[test]
    fn test_legacy_charset_is_accepted() {
        let mut keys = KeyGenerator::with_seed(3).with_charset(LEGACY_CHARSET).unwrap();

        let key = keys.next_correlation_id().unwrap();

        assert_eq!(key.as_str().len(), DEFAULT_CORRELATION_ID_LENGTH);
        assert!(key.as_str().chars().all(|c| LEGACY_CHARSET.contains(c)));
    }

    #[test]
    fn test_zero_length_is_rejected_synchronously() {
        let mut keys = KeyGenerator::new();

        let result = keys.generate(0);

        assert!(matches!(result, Err(HiveError::Validation(_))));
    }

    #[test]
    fn test_empty_charset_is_rejected() {
        let result = KeyGenerator::new().with_charset("");

        assert!(matches!(result, Err(HiveError::Validation(_))));
    }
}
