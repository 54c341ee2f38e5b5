//! AND / OR / NOT over predicates.
//!
//! Operands were authored against independent parameter identities. Each
//! combinator allocates one fresh identity, rebinds every operand body to it,
//! and wraps the results in a single logical node. An operand that is itself
//! a node of the same connective contributes its children, so folding many
//! predicates yields one flat node. Operands are never mutated.
//!
//! The identity predicate has no expression. It enters a merge as the
//! constant `true` through [`operand_body`], the only place that case is
//! handled.


use tracing::trace;

use crate::entity::Entity;
use crate::error::SpecError;
use crate::expr::{Expr, LogicalOp, ParamId, PredicateExpr};
use crate::predicate::Predicate;

/// Conjunction. `right` is not evaluated when `left` is false.
pub fn and<E: Entity>(left: &Predicate<E>, right: &Predicate<E>) -> Predicate<E> {
    merge(LogicalOp::And, &[left, right])
}

/// Disjunction. `right` is not evaluated when `left` is true.
pub fn or<E: Entity>(left: &Predicate<E>, right: &Predicate<E>) -> Predicate<E> {
    merge(LogicalOp::Or, &[left, right])
}

/// Conjunction of every operand as one n-ary node, evaluated left to right.
/// The identity predicate when `operands` is empty.
pub fn all<E: Entity>(operands: &[Predicate<E>]) -> Predicate<E> {
    let operands: Vec<&Predicate<E>> = operands.iter().collect();
    merge(LogicalOp::And, &operands)
}

/// Disjunction of every operand as one n-ary node, evaluated left to right.
/// Always false when `operands` is empty.
pub fn any<E: Entity>(operands: &[Predicate<E>]) -> Predicate<E> {
    let operands: Vec<&Predicate<E>> = operands.iter().collect();
    merge(LogicalOp::Or, &operands)
}

/// Negation. The negation of the identity predicate is the explicit
/// always-false predicate, not another identity.
pub fn not<E: Entity>(operand: &Predicate<E>) -> Predicate<E> {
    let shared = ParamId::fresh();
    let body = match operand.expression() {
        Some(_) => Expr::not(operand_body(operand, shared)),
        None => Expr::bool(false),
    };
    trace!(entity = E::entity_name(), param = %shared, "negated predicate");
    Predicate::from_validated(PredicateExpr::new(shared, body), operand.mode())
}

/// Checked [`and`] for operands that may be missing.
///
/// # Errors
///
/// Returns [`SpecError::InvalidArgument`] if either operand is `None`.
pub fn try_and<E: Entity>(
    left: Option<&Predicate<E>>,
    right: Option<&Predicate<E>>,
) -> Result<Predicate<E>, SpecError> {
    let (left, right) = require_pair(LogicalOp::And, left, right)?;
    Ok(and(left, right))
}

/// Checked [`or`] for operands that may be missing.
pub fn try_or<E: Entity>(
    left: Option<&Predicate<E>>,
    right: Option<&Predicate<E>>,
) -> Result<Predicate<E>, SpecError> {
    let (left, right) = require_pair(LogicalOp::Or, left, right)?;
    Ok(or(left, right))
}

/// Checked [`all`] for operands that may be missing.
///
/// # Errors
///
/// Returns [`SpecError::InvalidArgument`] naming the first missing position.
pub fn try_all<E: Entity>(operands: &[Option<&Predicate<E>>]) -> Result<Predicate<E>, SpecError> {
    let operands = require_each(LogicalOp::And, operands)?;
    Ok(merge(LogicalOp::And, &operands))
}

/// Checked [`any`] for operands that may be missing.
pub fn try_any<E: Entity>(operands: &[Option<&Predicate<E>>]) -> Result<Predicate<E>, SpecError> {
    let operands = require_each(LogicalOp::Or, operands)?;
    Ok(merge(LogicalOp::Or, &operands))
}

/// Checked [`not`] for an operand that may be missing.
pub fn try_not<E: Entity>(operand: Option<&Predicate<E>>) -> Result<Predicate<E>, SpecError> {
    let operand = require(LogicalOp::Not, "operand", operand)?;
    Ok(not(operand))
}

fn merge<E: Entity>(op: LogicalOp, operands: &[&Predicate<E>]) -> Predicate<E> {
    let (first, rest) = match operands {
        [] if op == LogicalOp::And => return Predicate::identity(),
        [] => return not(&Predicate::identity()),
        [single] => return (*single).clone(),
        [first, rest @ ..] => (first, rest),
    };

    let mode = first.mode();
    if first.is_identity() && rest.iter().all(|p| p.is_identity()) {
        return Predicate::identity_with_mode(mode);
    }

    // Each operand is rebound exactly once; same-op operands are spliced in
    // so repeated merging keeps the tree flat.
    let shared = ParamId::fresh();
    let mut bodies = Vec::with_capacity(operands.len());
    for &operand in operands {
        match operand_body(operand, shared) {
            Expr::Logical {
                op: inner,
                operands: nested,
            } if inner == op => bodies.extend(nested),
            body => bodies.push(body),
        }
    }
    trace!(
        entity = E::entity_name(),
        %op,
        operands = bodies.len(),
        param = %shared,
        "merged predicates"
    );
    let body = Expr::Logical {
        op,
        operands: bodies,
    };
    Predicate::from_validated(PredicateExpr::new(shared, body), mode)
}

/// The body an operand contributes to a merge, rebound to `shared`.
/// Identity operands contribute the constant `true`.
pub fn operand_body<E>(operand: &Predicate<E>, shared: ParamId) -> Expr {
    match operand.expression() {
        Some(expr) => expr.body_bound_to(shared),
        None => Expr::bool(true),
    }
}

fn require_pair<'a, E>(
    op: LogicalOp,
    left: Option<&'a Predicate<E>>,
    right: Option<&'a Predicate<E>>,
) -> Result<(&'a Predicate<E>, &'a Predicate<E>), SpecError> {
    Ok((
        require(op, "left operand", left)?,
        require(op, "right operand", right)?,
    ))
}

fn require_each<'a, E>(
    op: LogicalOp,
    operands: &[Option<&'a Predicate<E>>],
) -> Result<Vec<&'a Predicate<E>>, SpecError> {
    operands
        .iter()
        .enumerate()
        .map(|(i, operand)| require(op, &format!("operand {i}"), *operand))
        .collect()
}

fn require<'a, E>(
    op: LogicalOp,
    role: &str,
    operand: Option<&'a Predicate<E>>,
) -> Result<&'a Predicate<E>, SpecError> {
    operand.ok_or_else(|| SpecError::InvalidArgument(format!("{role} of {op} is missing")))
}
