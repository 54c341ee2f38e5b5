//! The predicate representation: an optional expression plus its compiled form.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::compile::{compile, CompiledPredicate};
use crate::entity::Entity;
use crate::error::SpecError;
use crate::expr::PredicateExpr;
use crate::validate::validate;

/// When the callable form is derived from the expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CompileMode {
    /// Compile during construction.
    #[default]
    Eager,

    /// Compile on first evaluation and memoize.
    Lazy,
}

/// Options applied when building a [`Predicate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub mode: CompileMode,

    /// Maximum accepted expression depth. Unbounded when `None`.
    pub max_depth: Option<usize>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: CompileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// An immutable predicate over `E`.
///
/// Holds the inspectable expression (absent for the identity predicate) and
/// the compiled test derived from it. Clones share both.
///
/// # Example
///
/// ```
/// use specforge_core::{Entity, Expr, FieldDef, Param, Predicate, Value, ValueKind};
///
/// struct Item {
///     stock: i64,
/// }
///
/// impl Entity for Item {
///     fn entity_name() -> &'static str {
///         "Item"
///     }
///     fn fields() -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[FieldDef::new("stock", ValueKind::Int)];
///         FIELDS
///     }
///     fn read_field(&self, _: usize) -> Value {
///         Value::Int(self.stock)
///     }
/// }
///
/// let p = Param::fresh();
/// let in_stock = Predicate::<Item>::new(p.lambda(Expr::gt(p.field("stock"), Expr::int(0)))).unwrap();
/// assert!(in_stock.evaluate(&Item { stock: 3 }));
/// assert!(!in_stock.evaluate(&Item { stock: 0 }));
/// ```
pub struct Predicate<E> {
    inner: Arc<Inner<E>>,
}

struct Inner<E> {
    expr: Option<PredicateExpr>,
    mode: CompileMode,
    compiled: OnceLock<CompiledPredicate<E>>,
}

impl<E: Entity> Predicate<E> {
    /// Validates and compiles `expr` with default options.
    pub fn new(expr: PredicateExpr) -> Result<Self, SpecError> {
        Self::with_options(expr, &CompileOptions::default())
    }

    /// Validates `expr` and builds a predicate with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Malformed`] if the tree fails validation.
    pub fn with_options(expr: PredicateExpr, options: &CompileOptions) -> Result<Self, SpecError> {
        if let Err(err) = validate::<E>(&expr, options.max_depth) {
            debug!(entity = E::entity_name(), expr = %expr, error = %err, "rejected predicate");
            return Err(err.into());
        }
        Ok(Self::from_validated(expr, options.mode))
    }

    /// The identity predicate: no expression, always true.
    pub fn identity() -> Self {
        Self::identity_with_mode(CompileMode::default())
    }

    pub(crate) fn identity_with_mode(mode: CompileMode) -> Self {
        let compiled = OnceLock::new();
        let _ = compiled.set(CompiledPredicate::always(true));
        Self {
            inner: Arc::new(Inner {
                expr: None,
                mode,
                compiled,
            }),
        }
    }

    // Callers guarantee `expr` is well-formed.
    pub(crate) fn from_validated(expr: PredicateExpr, mode: CompileMode) -> Self {
        let predicate = Self {
            inner: Arc::new(Inner {
                expr: Some(expr),
                mode,
                compiled: OnceLock::new(),
            }),
        };
        if mode == CompileMode::Eager {
            predicate.compiled();
        }
        predicate
    }

    /// Evaluates the predicate. Always true for the identity predicate.
    #[inline]
    pub fn evaluate(&self, entity: &E) -> bool {
        self.compiled().test(entity)
    }

    /// The callable form, compiling it first if needed.
    pub fn compiled(&self) -> &CompiledPredicate<E> {
        self.inner.compiled.get_or_init(|| match &self.inner.expr {
            Some(expr) => {
                debug!(
                    entity = E::entity_name(),
                    nodes = expr.body().node_count(),
                    mode = ?self.inner.mode,
                    "compiling predicate"
                );
                compile::<E>(expr)
            }
            None => CompiledPredicate::always(true),
        })
    }
}

impl<E> Predicate<E> {
    /// The structured form, absent for the identity predicate.
    pub fn expression(&self) -> Option<&PredicateExpr> {
        self.inner.expr.as_ref()
    }

    pub fn is_identity(&self) -> bool {
        self.inner.expr.is_none()
    }

    pub fn mode(&self) -> CompileMode {
        self.inner.mode
    }

    /// Whether the callable form has been derived yet.
    pub fn is_compiled(&self) -> bool {
        self.inner.compiled.get().is_some()
    }
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Entity> Default for Predicate<E> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<E> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("expr", &self.inner.expr)
            .field("mode", &self.inner.mode)
            .field("compiled", &self.is_compiled())
            .finish()
    }
}

impl<E> fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.expr {
            Some(expr) => write!(f, "{expr}"),
            None => f.write_str("<identity>"),
        }
    }
}
