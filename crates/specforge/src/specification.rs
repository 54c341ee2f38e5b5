//! The user-facing specification type.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use specforge_config::SpecConfig;
use specforge_core::combinator;
use specforge_core::{CompileOptions, Entity, Expr, Param, Predicate, PredicateExpr, SpecError};
use tracing::debug;

use crate::rule::{FnRule, Rule};

/// A reusable boolean rule over `E`.
///
/// Wraps a validated [`Predicate`]. Combining specifications never changes
/// the operands; `&`, `|` and `!` (or [`and`](Self::and), [`or`](Self::or),
/// [`not`](Self::not)) build new ones.
pub struct Specification<E> {
    predicate: Predicate<E>,
}

impl<E: Entity> Specification<E> {
    /// Builds a specification from a [`Rule`] with default options.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Malformed`] if the rule body fails validation.
    pub fn new<R: Rule<E>>(rule: R) -> Result<Self, SpecError> {
        Self::with_options(rule, &CompileOptions::default())
    }

    /// Builds a specification from a [`Rule`] using the compile mode and
    /// depth limit in `config`.
    pub fn with_config<R: Rule<E>>(rule: R, config: &SpecConfig) -> Result<Self, SpecError> {
        Self::with_options(rule, &config.compile_options())
    }

    pub fn with_options<R: Rule<E>>(rule: R, options: &CompileOptions) -> Result<Self, SpecError> {
        let param = Param::fresh();
        let body = rule.body(&param);
        Self::from_expr_with(param.lambda(body), options)
    }

    /// Builds a specification from a closure producing the rule body.
    ///
    /// ```
    /// use specforge::prelude::*;
    ///
    /// #[derive(Entity)]
    /// struct Account {
    ///     balance: i64,
    /// }
    ///
    /// let overdrawn = Specification::<Account>::from_fn(|a| Expr::lt(a.field("balance"), Expr::int(0))).unwrap();
    /// assert!(overdrawn.is_satisfied_by(&Account { balance: -5 }));
    /// ```
    pub fn from_fn<F>(body: F) -> Result<Self, SpecError>
    where
        F: Fn(&Param) -> Expr,
    {
        Self::new(FnRule(body))
    }

    /// Builds a specification from a complete predicate expression.
    pub fn from_expr(expr: PredicateExpr) -> Result<Self, SpecError> {
        Self::from_expr_with(expr, &CompileOptions::default())
    }

    pub fn from_expr_with(expr: PredicateExpr, options: &CompileOptions) -> Result<Self, SpecError> {
        let predicate = Predicate::with_options(expr, options)?;
        debug!(entity = E::entity_name(), spec = %predicate, "built specification");
        Ok(Self { predicate })
    }

    /// The identity specification: no expression, satisfied by everything.
    /// Neutral for [`and`](Self::and).
    pub fn empty() -> Self {
        Self {
            predicate: Predicate::identity(),
        }
    }

    /// Satisfied by nothing. Neutral for [`or`](Self::or).
    pub fn none() -> Self {
        combinator::not(&Predicate::identity()).into()
    }

    #[inline]
    pub fn is_satisfied_by(&self, entity: &E) -> bool {
        self.predicate.evaluate(entity)
    }

    /// Conjunction. `other` is not consulted when `self` is unsatisfied.
    pub fn and(&self, other: &Self) -> Self {
        combinator::and(&self.predicate, &other.predicate).into()
    }

    /// Disjunction. `other` is not consulted when `self` is satisfied.
    pub fn or(&self, other: &Self) -> Self {
        combinator::or(&self.predicate, &other.predicate).into()
    }

    /// Negation. The negation of [`empty`](Self::empty) is satisfied by
    /// nothing.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        combinator::not(&self.predicate).into()
    }

    /// Conjunction of every specification as one flat node, evaluated in
    /// order; [`empty`](Self::empty) for none.
    pub fn all<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let predicates: Vec<Predicate<E>> = specs.into_iter().map(Self::into_predicate).collect();
        combinator::all(&predicates).into()
    }

    /// Disjunction of every specification as one flat node, evaluated in
    /// order; [`none`](Self::none) for none.
    pub fn any<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let predicates: Vec<Predicate<E>> = specs.into_iter().map(Self::into_predicate).collect();
        combinator::any(&predicates).into()
    }

    /// The specification as a plain closure.
    pub fn predicate(&self) -> impl Fn(&E) -> bool + '_ {
        move |entity: &E| self.is_satisfied_by(entity)
    }

    /// Items satisfying the specification, in order.
    pub fn filter<'a, I>(&'a self, items: I) -> impl Iterator<Item = &'a E> + 'a
    where
        I: IntoIterator<Item = &'a E>,
        I::IntoIter: 'a,
    {
        items
            .into_iter()
            .filter(move |entity| self.is_satisfied_by(entity))
    }
}

impl<E> Specification<E> {
    /// The structured form, absent for [`empty`](Self::empty).
    pub fn expression(&self) -> Option<&PredicateExpr> {
        self.predicate.expression()
    }

    pub fn is_empty(&self) -> bool {
        self.predicate.is_identity()
    }

    pub fn as_predicate(&self) -> &Predicate<E> {
        &self.predicate
    }

    pub fn into_predicate(self) -> Predicate<E> {
        self.predicate
    }
}

impl<E> From<Predicate<E>> for Specification<E> {
    fn from(predicate: Predicate<E>) -> Self {
        Self { predicate }
    }
}

impl<E> Clone for Specification<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

impl<E: Entity> Default for Specification<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> fmt::Debug for Specification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Specification")
            .field(&self.predicate)
            .finish()
    }
}

impl<E> fmt::Display for Specification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.predicate, f)
    }
}

impl<E: Entity> BitAnd for Specification<E> {
    type Output = Specification<E>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Specification::and(&self, &rhs)
    }
}

impl<'a, E: Entity> BitAnd<&'a Specification<E>> for &'a Specification<E> {
    type Output = Specification<E>;

    fn bitand(self, rhs: &'a Specification<E>) -> Self::Output {
        Specification::and(self, rhs)
    }
}

impl<E: Entity> BitOr for Specification<E> {
    type Output = Specification<E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Specification::or(&self, &rhs)
    }
}

impl<'a, E: Entity> BitOr<&'a Specification<E>> for &'a Specification<E> {
    type Output = Specification<E>;

    fn bitor(self, rhs: &'a Specification<E>) -> Self::Output {
        Specification::or(self, rhs)
    }
}

impl<E: Entity> Not for Specification<E> {
    type Output = Specification<E>;

    fn not(self) -> Self::Output {
        Specification::not(&self)
    }
}

impl<E: Entity> Not for &Specification<E> {
    type Output = Specification<E>;

    fn not(self) -> Self::Output {
        Specification::not(self)
    }
}
