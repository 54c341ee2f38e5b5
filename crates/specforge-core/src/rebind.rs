//! Parameter rebinding.
//!
//! Two predicate expressions authored independently each carry their own
//! parameter identity. Before they can sit under one connective, every
//! reference to each operand's parameter is rewritten to a shared identity.
//! Rewriting never mutates: a new tree is produced.

use crate::expr::{Expr, ParamId, PredicateExpr};

impl Expr {
    /// Returns a copy of this tree with every reference to `from` replaced by
    /// `to`. References to other identities are left untouched.
    pub fn rebind(&self, from: ParamId, to: ParamId) -> Expr {
        match self {
            Expr::Parameter(id) => Expr::Parameter(swap(*id, from, to)),
            Expr::Member { param, field } => Expr::Member {
                param: swap(*param, from, to),
                field: field.clone(),
            },
            Expr::Constant(value) => Expr::Constant(value.clone()),
            Expr::Compare { op, left, right } => Expr::Compare {
                op: *op,
                left: Box::new(left.rebind(from, to)),
                right: Box::new(right.rebind(from, to)),
            },
            Expr::Logical { op, operands } => Expr::Logical {
                op: *op,
                operands: operands.iter().map(|e| e.rebind(from, to)).collect(),
            },
        }
    }
}

#[inline]
fn swap(id: ParamId, from: ParamId, to: ParamId) -> ParamId {
    if id == from {
        to
    } else {
        id
    }
}

impl PredicateExpr {
    /// The body of this lambda, rewritten to use `to` as its parameter.
    pub fn body_bound_to(&self, to: ParamId) -> Expr {
        if self.param() == to {
            return self.body().clone();
        }
        self.body().rebind(self.param(), to)
    }

    /// A copy of this lambda over `to`.
    pub fn rebound(&self, to: ParamId) -> PredicateExpr {
        PredicateExpr::new(to, self.body_bound_to(to))
    }
}
