// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::Value;

/// Result of one fan-out command.
///
/// A hive of one worker resolves to that worker's reply directly; larger hives
/// resolve to every reply in hive order, independent of arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Aggregate<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Aggregate<T> {
    /// Build an aggregate from replies already arranged in hive order.
    pub(crate) fn from_ordered(mut results: Vec<T>) -> Self {
        if results.len() == 1 {
            if let Some(only) = results.pop() {
                return Aggregate::Single(only);
            }
        }
        Aggregate::Many(results)
    }

    pub fn len(&self) -> usize {
        match self {
            Aggregate::Single(_) => 1,
            Aggregate::Many(results) => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Aggregate::Single(_))
    }

    /// The lone reply, if the hive had exactly one worker.
    pub fn single(self) -> Option<T> {
        match self {
            Aggregate::Single(result) => Some(result),
            Aggregate::Many(_) => None,
        }
    }

    /// Every reply in hive order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Aggregate::Single(result) => vec![result],
            Aggregate::Many(results) => results,
        }
    }

    pub fn map<U, F>(self, mut f: F) -> Aggregate<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Aggregate::Single(result) => Aggregate::Single(f(result)),
            Aggregate::Many(results) => Aggregate::Many(results.into_iter().map(f).collect()),
        }
    }

    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Aggregate<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        match self {
            Aggregate::Single(result) => Ok(Aggregate::Single(f(result)?)),
            Aggregate::Many(results) => Ok(Aggregate::Many(
                results.into_iter().map(f).collect::<Result<Vec<_>, E>>()?,
            )),
        }
    }
}

impl Aggregate<Value> {
    /// Flatten into a single JSON value: the reply itself or an array of replies.
    pub fn into_value(self) -> Value {
        match self {
            Aggregate::Single(result) => result,
            Aggregate::Many(results) => Value::Array(results),
        }
    }
}
