//! Expression trees for specification predicates.
//!
//! A [`PredicateExpr`] is a one-parameter lambda: a [`ParamId`] plus a boolean
//! [`Expr`] body. Bodies reference the parameter either directly
//! ([`Expr::Parameter`]) or through a field read ([`Expr::Member`]).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::value::Value;

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of the free variable of a predicate expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamId(u64);

impl ParamId {
    /// Allocates an identity never handed out before in this process.
    pub fn fresh() -> Self {
        ParamId(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$p{}", self.0)
    }
}

/// Authoring handle for the parameter of an expression under construction.
///
/// # Example
///
/// ```
/// use specforge_core::{Expr, Param};
///
/// let p = Param::fresh();
/// let adult = p.lambda(Expr::ge(p.field("age"), Expr::int(18)));
/// assert_eq!(adult.param(), p.id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    id: ParamId,
}

impl Param {
    pub fn fresh() -> Self {
        Self {
            id: ParamId::fresh(),
        }
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    /// The bare parameter node.
    pub fn expr(&self) -> Expr {
        Expr::Parameter(self.id)
    }

    /// A field read on the parameter.
    pub fn field(&self, name: impl Into<Arc<str>>) -> Expr {
        Expr::member(self.id, name)
    }

    /// Closes `body` over this parameter.
    pub fn lambda(self, body: Expr) -> PredicateExpr {
        PredicateExpr::new(self.id, body)
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Equality operators accept any operand kinds; the rest need an ordering.
    pub fn is_equality(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::Not => "NOT",
        })
    }
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// The free variable itself.
    Parameter(ParamId),
    /// Field read on the parameter.
    Member { param: ParamId, field: Arc<str> },
    Constant(Value),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `Not` takes exactly one operand, `And`/`Or` two or more.
    Logical { op: LogicalOp, operands: Vec<Expr> },
}

impl Expr {
    // Constructors for common expressions

    pub fn param(id: ParamId) -> Self {
        Expr::Parameter(id)
    }

    pub fn member(param: ParamId, field: impl Into<Arc<str>>) -> Self {
        Expr::Member {
            param,
            field: field.into(),
        }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn bool(value: bool) -> Self {
        Expr::Constant(Value::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant(Value::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Constant(Value::Float(value))
    }

    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Expr::Constant(Value::Str(value.into()))
    }

    pub fn null() -> Self {
        Expr::Constant(Value::Null)
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    pub fn ne(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Ne, left, right)
    }

    pub fn lt(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    pub fn le(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Le, left, right)
    }

    pub fn gt(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    pub fn ge(left: Expr, right: Expr) -> Self {
        Self::compare(CompareOp::Ge, left, right)
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            operands: vec![left, right],
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            operands: vec![left, right],
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::Not,
            operands: vec![expr],
        }
    }

    /// N-ary conjunction.
    pub fn all(operands: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            operands: operands.into_iter().collect(),
        }
    }

    /// N-ary disjunction.
    pub fn any(operands: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            operands: operands.into_iter().collect(),
        }
    }

    /// Short node name used in diagnostics.
    pub fn node_name(&self) -> &'static str {
        match self {
            Expr::Parameter(_) => "parameter",
            Expr::Member { .. } => "member access",
            Expr::Constant(_) => "constant",
            Expr::Compare { .. } => "comparison",
            Expr::Logical { .. } => "logical expression",
        }
    }

    /// Depth of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Parameter(_) | Expr::Member { .. } | Expr::Constant(_) => 1,
            Expr::Compare { left, right, .. } => 1 + left.depth().max(right.depth()),
            Expr::Logical { operands, .. } => {
                1 + operands.iter().map(Expr::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Expr::Parameter(_) | Expr::Member { .. } | Expr::Constant(_) => 1,
            Expr::Compare { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Logical { operands, .. } => {
                1 + operands.iter().map(Expr::node_count).sum::<usize>()
            }
        }
    }

    /// Calls `f` with every parameter identity referenced in the tree.
    pub fn for_each_param(&self, f: &mut impl FnMut(ParamId)) {
        match self {
            Expr::Parameter(id) | Expr::Member { param: id, .. } => f(*id),
            Expr::Constant(_) => {}
            Expr::Compare { left, right, .. } => {
                left.for_each_param(f);
                right.for_each_param(f);
            }
            Expr::Logical { operands, .. } => {
                for operand in operands {
                    operand.for_each_param(f);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(id) => write!(f, "{id}"),
            Expr::Member { param, field } => write!(f, "{param}.{field}"),
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Compare { op, left, right } => write!(f, "{left} {op} {right}"),
            Expr::Logical {
                op: LogicalOp::Not,
                operands,
            } => {
                f.write_str("NOT ")?;
                match operands.as_slice() {
                    [single] => write!(f, "({single})"),
                    _ => f.write_str("(?)"),
                }
            }
            Expr::Logical { op, operands } => {
                f.write_str("(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {op} ")?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A boolean expression closed over exactly one parameter.
///
/// Equality is structural and ignores which identity each side uses for its
/// parameter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredicateExpr {
    param: ParamId,
    body: Expr,
}

impl PredicateExpr {
    pub fn new(param: ParamId, body: Expr) -> Self {
        Self { param, body }
    }

    /// The always-true and always-false lambdas.
    pub fn constant(value: bool) -> Self {
        Self::new(ParamId::fresh(), Expr::bool(value))
    }

    pub fn param(&self) -> ParamId {
        self.param
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    pub fn into_body(self) -> Expr {
        self.body
    }

    /// Structural equality modulo parameter identity.
    pub fn same_shape(&self, other: &PredicateExpr) -> bool {
        self.body == other.body.rebind(other.param, self.param)
    }
}

impl PartialEq for PredicateExpr {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(other)
    }
}

impl fmt::Display for PredicateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}| {}", self.param, self.body)
    }
}
