// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::Arc;

use crate::codec::is_number;
use crate::engine::drone::Drone;
use crate::traits::{Command, CommandHandler};

/// Add up a list of JSON numbers.
///
/// The sum stays an integer while every term is one; any fractional term
/// makes it a float. A non-number term fails the handler, so no reply is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sum(pub Vec<Value>);

impl Command for Sum {
    const TOPIC: &'static str = "sum";
    type Output = Number;
}

pub fn sum(terms: &[Value]) -> anyhow::Result<Number> {
    if let Some(bad) = terms.iter().find(|term| !is_number(term)) {
        anyhow::bail!("sum expects numbers, got {}", bad);
    }

    let integers: Option<Vec<i64>> = terms.iter().map(Value::as_i64).collect();
    if let Some(integers) = integers {
        if let Some(total) = integers.iter().try_fold(0i64, |acc, n| acc.checked_add(*n)) {
            return Ok(Number::from(total));
        }
    }

    let total: f64 = terms.iter().filter_map(Value::as_f64).sum();
    Number::from_f64(total).ok_or_else(|| anyhow::anyhow!("sum is not a finite number"))
}

pub fn install(drone: &mut Drone) -> Arc<dyn CommandHandler> {
    drone.on_command::<Sum, _, _>(|Sum(terms)| async move { sum(&terms) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_sum_stays_integer() {
        assert_eq!(sum(&[json!(1), json!(2), json!(39)]).unwrap(), Number::from(42));
    }

    #[test]
    fn test_fractional_sum() {
        assert_eq!(sum(&[json!(1), json!(0.5)]).unwrap().as_f64(), Some(1.5));
    }

    #[test]
    fn test_empty_sum_is_zero() {
        assert_eq!(sum(&[]).unwrap(), Number::from(0));
    }

    #[test]
    fn test_numeric_string_is_rejected() {
        assert!(sum(&[json!(1), json!("2")]).is_err());
    }
}
