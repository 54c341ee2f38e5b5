//! Construction-time validation of predicate expressions.
//!
//! A tree is accepted only if it has a single parameter identity, every member
//! read names a field of the entity, every logical operand is boolean, and all
//! comparisons are between comparable kinds. Evaluation never re-checks.

use crate::entity::Entity;
use crate::error::MalformedExpression;
use crate::expr::{CompareOp, Expr, LogicalOp, ParamId, PredicateExpr};
use crate::value::ValueKind;

// Static type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ty {
    Kind(ValueKind),
    Null,
    Entity,
}

/// Validates `expr` against the field table of `E`.
///
/// `max_depth`, when set, bounds the depth of the body.
pub fn validate<E: Entity>(
    expr: &PredicateExpr,
    max_depth: Option<usize>,
) -> Result<(), MalformedExpression> {
    if let Some(limit) = max_depth {
        let depth = expr.body().depth();
        if depth > limit {
            return Err(MalformedExpression::TooDeep { depth, limit });
        }
    }

    let checker = Checker::<E> {
        param: expr.param(),
        _entity: std::marker::PhantomData,
    };
    let ty = checker.check(expr.body())?;
    ensure_bool(ty, expr.body())
}

struct Checker<E> {
    param: ParamId,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Entity> Checker<E> {
    fn check(&self, expr: &Expr) -> Result<Ty, MalformedExpression> {
        match expr {
            Expr::Parameter(id) => {
                self.check_param(*id)?;
                Ok(Ty::Entity)
            }

            Expr::Member { param, field } => {
                self.check_param(*param)?;
                let def = E::field_def(field).ok_or_else(|| MalformedExpression::UnknownField {
                    entity: E::entity_name(),
                    field: field.to_string(),
                })?;
                Ok(Ty::Kind(def.kind))
            }

            Expr::Constant(value) => Ok(value.kind().map_or(Ty::Null, Ty::Kind)),

            Expr::Compare { op, left, right } => {
                let l = self.check(left)?;
                let r = self.check(right)?;
                check_comparable(*op, l, r)?;
                Ok(Ty::Kind(ValueKind::Bool))
            }

            Expr::Logical { op, operands } => {
                check_arity(*op, operands.len())?;
                for operand in operands {
                    let ty = self.check(operand)?;
                    ensure_bool(ty, operand)?;
                }
                Ok(Ty::Kind(ValueKind::Bool))
            }
        }
    }

    fn check_param(&self, found: ParamId) -> Result<(), MalformedExpression> {
        if found == self.param {
            Ok(())
        } else {
            Err(MalformedExpression::UnboundParameter {
                found,
                expected: self.param,
            })
        }
    }
}

fn ensure_bool(ty: Ty, expr: &Expr) -> Result<(), MalformedExpression> {
    match ty {
        Ty::Kind(ValueKind::Bool) => Ok(()),
        _ => Err(MalformedExpression::NotBoolean {
            node: expr.node_name(),
        }),
    }
}

fn check_arity(op: LogicalOp, found: usize) -> Result<(), MalformedExpression> {
    let (ok, expected) = match op {
        LogicalOp::Not => (found == 1, "exactly 1"),
        LogicalOp::And | LogicalOp::Or => (found >= 2, "at least 2"),
    };
    if ok {
        Ok(())
    } else {
        Err(MalformedExpression::InvalidArity {
            op,
            expected,
            found,
        })
    }
}

fn check_comparable(op: CompareOp, left: Ty, right: Ty) -> Result<(), MalformedExpression> {
    match (left, right) {
        (Ty::Entity, _) | (_, Ty::Entity) => Err(MalformedExpression::UnsupportedOperand {
            node: "parameter",
        }),
        (Ty::Null, _) | (_, Ty::Null) => {
            if op.is_equality() {
                Ok(())
            } else {
                Err(MalformedExpression::UnsupportedOperand { node: "null" })
            }
        }
        (Ty::Kind(l), Ty::Kind(r)) => {
            if l == r || (l.is_numeric() && r.is_numeric()) {
                Ok(())
            } else {
                Err(MalformedExpression::Incomparable {
                    op,
                    left: l,
                    right: r,
                })
            }
        }
    }
}
