//! Value comparison functions.

use std::cmp::Ordering;

use crate::expr::CompareOp;
use crate::value::Value;

/// Checks if two values are equal, comparing integers and floats numerically.
/// NaN equals NaN (see [`Value`]); an integer never equals NaN.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) => (*x as f64) == *y,
        (Value::Float(x), Value::Int(y)) => *x == (*y as f64),
        _ => a == b,
    }
}

/// Orders two values. `Null` and mismatched kinds are unordered.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Applies a comparison operator. Unordered operands fail every ordering test.
pub fn apply(op: CompareOp, a: &Value, b: &Value) -> bool {
    match op {
        CompareOp::Eq => values_equal(a, b),
        CompareOp::Ne => !values_equal(a, b),
        CompareOp::Lt => compare_values(a, b).is_some_and(Ordering::is_lt),
        CompareOp::Le => compare_values(a, b).is_some_and(Ordering::is_le),
        CompareOp::Gt => compare_values(a, b).is_some_and(Ordering::is_gt),
        CompareOp::Ge => compare_values(a, b).is_some_and(Ordering::is_ge),
    }
}
