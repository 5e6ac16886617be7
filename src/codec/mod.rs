// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Serialization guard for values crossing the worker boundary.
//!
//! Payloads travel between the queen and her workers as owned
//! [`serde_json::Value`]s. [`guard`] makes a best-effort deep copy through the
//! JSON text form before a value is posted; when that round trip fails the raw
//! value is passed through instead. Callers holding a shared or cyclic graph
//! build it as a [`Node`] and flatten it with [`decycle`] first.

mod node;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::CodecError;
use crate::observability::messages::{codec::GuardFallback, StructuredLog};

pub use node::{decycle, Node};

/// Deep-copy `value` through its JSON text form, falling back to `value` itself.
pub fn guard(value: Value) -> Value {
    let round_trip = serde_json::to_string(&value)
        .and_then(|text| serde_json::from_str::<Value>(&text));

    match round_trip {
        Ok(copy) => copy,
        Err(err) => {
            GuardFallback { error: &err }.log();
            value
        }
    }
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value, CodecError> {
    serde_json::to_value(value).map_err(CodecError::Encode)
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, CodecError> {
    serde_json::from_value(value).map_err(CodecError::Decode)
}

pub fn stringify<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// True for JSON numbers. Numeric strings such as `"3"` are not numbers.
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_guard_returns_equal_copy() {
        let payload = json!({"text": "hello", "n": [1, 2.5, null]});

        assert_eq!(guard(payload.clone()), payload);
    }

    #[test]
    fn test_guard_falls_back_to_raw_value_when_round_trip_fails() {
        // The JSON parser refuses nesting deeper than 128 levels.
        let mut deep = json!(0);
        for _ in 0..200 {
            deep = Value::Array(vec![deep]);
        }

        assert_eq!(guard(deep.clone()), deep);
    }

    #[test]
    fn test_encode_decode_typed_value() {
        let value = encode(&Point { x: 1, y: -2 }).unwrap();

        assert_eq!(value, json!({"x": 1, "y": -2}));
        assert_eq!(decode::<Point>(value).unwrap(), Point { x: 1, y: -2 });
    }

    #[test]
    fn test_decode_mismatch_is_reported() {
        let result = decode::<Point>(json!("not a point"));

        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!([1, "a"])).unwrap(), "[1,\"a\"]");
    }

    #[test]
    fn test_is_number() {
        assert!(is_number(&json!(3)));
        assert!(is_number(&json!(-0.5)));
        assert!(!is_number(&json!("3")));
        assert!(!is_number(&Value::Null));
    }
}
