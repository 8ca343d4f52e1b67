//! Conversion of value trees into the host's dynamic representation.
//!
//! The host representation is [`serde_json::Value`] built with key order preserved.
//! It distinguishes integers from floats, which the tree does not: a number whose
//! fractional part is exactly zero becomes an integer, anything else a float.

use serde_json::{Map, Number};

use crate::json::{Array, Object, Value};

/// Host dynamic value.
pub type HostValue = serde_json::Value;

/// Rebuilds a whole tree (or subtree) as a host value.
pub fn to_host(value: &Value) -> HostValue {
    match value {
        Value::String(s) => HostValue::String(s.clone()),
        Value::Number(n) => number_to_host(*n),
        Value::Object(o) => object_to_host(o),
        Value::Array(a) => array_to_host(a),
        Value::True => HostValue::Bool(true),
        Value::False => HostValue::Bool(false),
        Value::Null => HostValue::Null,
    }
}

/// Rebuilds an object as a host map.
pub fn object_to_host(object: &Object) -> HostValue {
    let map: Map<String, HostValue> = object
        .iter()
        .map(|(key, value)| (key.to_string(), to_host(value)))
        .collect();
    HostValue::Object(map)
}

/// Rebuilds an array as a host list.
pub fn array_to_host(array: &Array) -> HostValue {
    HostValue::Array(array.iter().map(to_host).collect())
}

/// Classifies a tree number as host integer or float.
///
/// Integral values outside the `i64` range stay floats. Non-finite values have no host
/// representation and become null.
pub fn number_to_host(n: f64) -> HostValue {
    // 2^63: the first integral f64 past i64::MAX.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if n.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&n) {
        HostValue::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(HostValue::Null, HostValue::Number)
    }
}

/// Serializes the host value of a tree as JSON text.
pub fn to_host_string(value: &Value) -> String {
    to_host(value).to_string()
}
