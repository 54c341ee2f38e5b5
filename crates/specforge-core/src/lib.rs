//! SpecForge Core - predicate expressions and their combinators
//!
//! This crate provides the pieces the `specforge` facade is built from:
//! - [`Expr`] / [`PredicateExpr`] trees with a single parameter identity
//! - construction-time validation against an [`Entity`] field table
//! - a reference interpreter and a closure compiler
//! - [`Predicate`], pairing an expression with its compiled form
//! - AND / OR / NOT combinators that rebind operands to a shared parameter

pub mod combinator;
pub mod compile;
pub mod entity;
pub mod error;
pub mod eval;
pub mod expr;
pub mod predicate;
pub mod rebind;
pub mod validate;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use compile::CompiledPredicate;
pub use entity::{Entity, FieldDef};
pub use error::{MalformedExpression, Result, SpecError};
pub use expr::{CompareOp, Expr, LogicalOp, Param, ParamId, PredicateExpr};
pub use predicate::{CompileMode, CompileOptions, Predicate};
pub use value::{Value, ValueKind};
