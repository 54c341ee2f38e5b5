//! Error types for SpecForge

use thiserror::Error;

use crate::expr::{CompareOp, LogicalOp, ParamId};
use crate::value::ValueKind;

/// Main error type for specification construction and composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// The expression tree failed construction-time validation.
    #[error("Malformed expression: {0}")]
    Malformed(#[from] MalformedExpression),

    /// A combinator received a missing operand.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Reasons an expression tree is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedExpression {
    #[error("parameter {found} is not bound by this expression (expected {expected})")]
    UnboundParameter { found: ParamId, expected: ParamId },

    #[error("entity `{entity}` has no field `{field}`")]
    UnknownField { entity: &'static str, field: String },

    #[error("{node} is not a boolean expression")]
    NotBoolean { node: &'static str },

    #[error("{node} cannot be used as a comparison operand")]
    UnsupportedOperand { node: &'static str },

    #[error("{op} expects {expected} operand(s), found {found}")]
    InvalidArity {
        op: LogicalOp,
        expected: &'static str,
        found: usize,
    },

    #[error("cannot apply `{op}` to {left} and {right}")]
    Incomparable {
        op: CompareOp,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("expression depth {depth} exceeds limit {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Result type alias for SpecForge operations
pub type Result<T> = std::result::Result<T, SpecError>;
