//! Compilation of predicate expressions into native closures.
//!
//! Each node becomes a boxed closure; the tree is walked once, at compile
//! time. Member names are resolved to field indices here so evaluation reads
//! fields by position.
//!
//! # Calling Convention
//!
//! Boolean positions compile to `Fn(&E) -> bool`, value positions to
//! `Fn(&E) -> Value`. Comparisons against a constant capture the constant
//! instead of re-evaluating it.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::eval::compare;
use crate::expr::{Expr, LogicalOp, PredicateExpr};
use crate::value::Value;

type BoolFn<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type ValueFn<E> = Box<dyn Fn(&E) -> Value + Send + Sync>;

/// The callable form of a predicate. Cheap to clone.
pub struct CompiledPredicate<E> {
    test: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> CompiledPredicate<E> {
    /// Wraps an arbitrary test function.
    pub fn from_fn(f: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        Self { test: Arc::new(f) }
    }

    /// A predicate with a fixed answer.
    pub fn always(value: bool) -> Self
    where
        E: 'static,
    {
        Self::from_fn(move |_| value)
    }

    #[inline]
    pub fn test(&self, entity: &E) -> bool {
        (self.test)(entity)
    }
}

impl<E> Clone for CompiledPredicate<E> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<E> fmt::Debug for CompiledPredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledPredicate(..)")
    }
}

/// Compiles a predicate expression for entity type `E`.
///
/// Compilation is pure: the same expression always yields an observationally
/// equal function.
pub fn compile<E: Entity>(expr: &PredicateExpr) -> CompiledPredicate<E> {
    let f = compile_bool::<E>(expr.body());
    CompiledPredicate {
        test: Arc::from(f),
    }
}

fn compile_bool<E: Entity>(expr: &Expr) -> BoolFn<E> {
    match expr {
        Expr::Constant(value) => {
            let b = value.as_bool().unwrap_or(false);
            Box::new(move |_: &E| b)
        }

        Expr::Member { field, .. } => match E::field_index(field) {
            Some(idx) => Box::new(move |e: &E| e.read_field(idx).as_bool().unwrap_or(false)),
            None => Box::new(|_: &E| false),
        },

        Expr::Parameter(_) => Box::new(|_: &E| false),

        Expr::Compare { op, left, right } => {
            let op = *op;
            match (left.as_ref(), right.as_ref()) {
                (l, Expr::Constant(c)) => {
                    let l = compile_value::<E>(l);
                    let c = c.clone();
                    Box::new(move |e: &E| compare::apply(op, &l(e), &c))
                }
                (Expr::Constant(c), r) => {
                    let r = compile_value::<E>(r);
                    let c = c.clone();
                    Box::new(move |e: &E| compare::apply(op, &c, &r(e)))
                }
                (l, r) => {
                    let l = compile_value::<E>(l);
                    let r = compile_value::<E>(r);
                    Box::new(move |e: &E| compare::apply(op, &l(e), &r(e)))
                }
            }
        }

        Expr::Logical { op, operands } => compile_logical(*op, operands),
    }
}

fn compile_logical<E: Entity>(op: LogicalOp, operands: &[Expr]) -> BoolFn<E> {
    let mut compiled: Vec<BoolFn<E>> = operands.iter().map(compile_bool::<E>).collect();

    // Combinators always produce two operands.
    if compiled.len() == 2 && op != LogicalOp::Not {
        if let (Some(right), Some(left)) = (compiled.pop(), compiled.pop()) {
            return match op {
                LogicalOp::Or => Box::new(move |e: &E| left(e) || right(e)),
                _ => Box::new(move |e: &E| left(e) && right(e)),
            };
        }
    }

    match op {
        LogicalOp::Not => match compiled.pop() {
            Some(inner) if compiled.is_empty() => Box::new(move |e: &E| !inner(e)),
            _ => Box::new(|_: &E| false),
        },
        LogicalOp::And => Box::new(move |e: &E| compiled.iter().all(|f| f(e))),
        LogicalOp::Or => Box::new(move |e: &E| compiled.iter().any(|f| f(e))),
    }
}

fn compile_value<E: Entity>(expr: &Expr) -> ValueFn<E> {
    match expr {
        Expr::Constant(value) => {
            let value = value.clone();
            Box::new(move |_: &E| value.clone())
        }

        Expr::Member { field, .. } => match E::field_index(field) {
            Some(idx) => Box::new(move |e: &E| e.read_field(idx)),
            None => Box::new(|_: &E| Value::Null),
        },

        Expr::Parameter(_) => Box::new(|_: &E| Value::Null),

        Expr::Compare { .. } | Expr::Logical { .. } => {
            let f = compile_bool::<E>(expr);
            Box::new(move |e: &E| Value::Bool(f(e)))
        }
    }
}
