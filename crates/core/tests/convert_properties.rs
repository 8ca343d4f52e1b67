//! Property tests for value tree conversion.

use proptest::prelude::*;
use serde_json::Value as HostValue;

use osrmc_core::convert::{number_to_host, to_host};
use osrmc_core::{Object, Value};

fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
        (-1_000_000i64..1_000_000).prop_map(|i| Value::Number(i as f64)),
        Just(Value::True),
        Just(Value::False),
        Just(Value::Null),
    ];

    leaf.prop_recursive(5, 128, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..8).prop_map(|entries| {
                let mut object = Object::new();
                for (key, value) in entries {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

/// Checks that `host` has exactly the shape and scalar contents of `tree`.
fn same_shape(tree: &Value, host: &HostValue) -> bool {
    match (tree, host) {
        (Value::String(a), HostValue::String(b)) => a == b,
        (Value::Number(n), HostValue::Number(m)) => m.as_f64() == Some(*n),
        (Value::True, HostValue::Bool(true)) => true,
        (Value::False, HostValue::Bool(false)) => true,
        (Value::Null, HostValue::Null) => true,
        (Value::Array(a), HostValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
        }
        (Value::Object(a), HostValue::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && same_shape(va, vb))
        }
        _ => false,
    }
}

fn depth(tree: &Value) -> usize {
    match tree {
        Value::Array(a) => 1 + a.iter().map(depth).max().unwrap_or(0),
        Value::Object(o) => 1 + o.iter().map(|(_, v)| depth(v)).max().unwrap_or(0),
        _ => 0,
    }
}

fn host_depth(host: &HostValue) -> usize {
    match host {
        HostValue::Array(a) => 1 + a.iter().map(host_depth).max().unwrap_or(0),
        HostValue::Object(o) => 1 + o.values().map(host_depth).max().unwrap_or(0),
        _ => 0,
    }
}

proptest! {
    #[test]
    fn prop_conversion_preserves_shape(tree in arb_tree()) {
        let host = to_host(&tree);
        prop_assert!(same_shape(&tree, &host));
        prop_assert_eq!(depth(&tree), host_depth(&host));
    }

    #[test]
    fn prop_integral_numbers_become_integers(i in -(1i64 << 52)..(1i64 << 52)) {
        let host = number_to_host(i as f64);
        prop_assert_eq!(host.as_i64(), Some(i));
    }

    #[test]
    fn prop_fractional_numbers_stay_floats(n in -1.0e9f64..1.0e9) {
        prop_assume!(n.fract() != 0.0);
        let host = number_to_host(n);
        prop_assert!(host.is_f64());
        prop_assert_eq!(host.as_f64(), Some(n));
    }
}

#[test]
fn test_deep_tree() {
    let mut tree = Value::from(1.5);
    for i in 0..256 {
        tree = if i % 2 == 0 {
            Value::from(vec![tree])
        } else {
            Value::from(Object::new().with("k", tree))
        };
    }
    let host = to_host(&tree);
    assert!(same_shape(&tree, &host));
    assert_eq!(host_depth(&host), 256);
}
