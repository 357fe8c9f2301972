// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Structural equality used to gate every editor emission.

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::warn;

/// Deep structural equality over plain data
///
/// Mappings compare by key set regardless of key order, sequences pairwise,
/// numbers by numeric value (`1` equals `1.0`, NaN equals NaN).
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| deep_equal(a, b)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => (a.is_nan() && b.is_nan()) || a == b,
        _ => false,
    }
}

/// [`deep_equal`] over any two serializable values
///
/// Non-finite floats serialize as null, so an unset NaN field compares equal
/// to itself. Values that fail to serialize never compare equal.
pub fn same_value<A, B>(a: &A, b: &B) -> bool
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    match (serde_json::to_value(a), serde_json::to_value(b)) {
        (Ok(a), Ok(b)) => deep_equal(&a, &b),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Equality check on unserializable value: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_does_not_matter() {
        let a = json!({"entity": "sensor.a", "icon_color": {"bigger": "red", "smaller": "green"}});
        let b = json!({"icon_color": {"smaller": "green", "bigger": "red"}, "entity": "sensor.a"});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_key_sets_must_match() {
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": null})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn test_sequences_compare_pairwise() {
        assert!(deep_equal(&json!([1, [2, 3]]), &json!([1, [2, 3]])));
        assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(deep_equal(&json!(5), &json!(5.0)));
        assert!(deep_equal(&json!(-3), &json!(-3)));
        assert!(!deep_equal(&json!(2), &json!(2.5)));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_nan_equals_nan() {
        assert!(same_value(&f64::NAN, &f64::NAN));
        assert!(same_value(&Some(f64::NAN), &Some(f64::NAN)));
        assert!(!same_value(&1.0_f64, &f64::NAN));
    }

    #[test]
    fn test_same_value_on_records() {
        use fluxion_card_types::EntitySettings;

        let a = EntitySettings {
            threshold: Some(5.0),
            ..EntitySettings::for_entity("sensor.a")
        };
        let b = a.clone();
        assert!(same_value(&a, &b));

        let c = EntitySettings {
            threshold: Some(6.0),
            ..a.clone()
        };
        assert!(!same_value(&a, &c));
    }
}
