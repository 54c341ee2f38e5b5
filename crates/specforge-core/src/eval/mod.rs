//! Reference interpreter for predicate expressions.
//!
//! Walks the tree on every call. The compiled form in [`crate::compile`] must
//! agree with this interpreter on every well-formed expression.


pub mod compare;

use crate::entity::Entity;
use crate::expr::{Expr, LogicalOp, PredicateExpr};
use crate::value::Value;

/// Evaluates a predicate expression against an entity.
pub fn eval_predicate<E: Entity>(expr: &PredicateExpr, entity: &E) -> bool {
    eval_bool(expr.body(), entity)
}

/// Evaluates an expression in a boolean position. Non-boolean results
/// (including `Null`) count as false.
pub fn eval_bool<E: Entity>(expr: &Expr, entity: &E) -> bool {
    match expr {
        Expr::Logical { op, operands } => match op {
            LogicalOp::And => operands.iter().all(|o| eval_bool(o, entity)),
            LogicalOp::Or => operands.iter().any(|o| eval_bool(o, entity)),
            LogicalOp::Not => match operands.as_slice() {
                [single] => !eval_bool(single, entity),
                _ => false,
            },
        },
        Expr::Compare { op, left, right } => {
            let l = eval_value(left, entity);
            let r = eval_value(right, entity);
            compare::apply(*op, &l, &r)
        }
        other => eval_value(other, entity).as_bool().unwrap_or(false),
    }
}

/// Evaluates an expression to a value.
pub fn eval_value<E: Entity>(expr: &Expr, entity: &E) -> Value {
    match expr {
        Expr::Constant(v) => v.clone(),

        Expr::Member { field, .. } => entity.field(field).unwrap_or(Value::Null),

        // The entity itself has no scalar value.
        Expr::Parameter(_) => Value::Null,

        Expr::Compare { .. } | Expr::Logical { .. } => Value::Bool(eval_bool(expr, entity)),
    }
}
