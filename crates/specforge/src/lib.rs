//! SpecForge - composable specifications in Rust
//!
//! A [`Specification`] is a named, reusable boolean rule over an entity. It
//! keeps an inspectable expression tree alongside the compiled test, so the
//! same rule can be evaluated in-process or handed to something that
//! translates it elsewhere.
//!
//! # Example
//!
//! ```rust
//! use specforge::prelude::*;
//!
//! #[derive(Entity)]
//! struct Applicant {
//!     age: u32,
//!     has_consent: bool,
//! }
//!
//! let is_adult = Specification::<Applicant>::from_fn(|p| Expr::ge(p.field("age"), Expr::int(18))).unwrap();
//! let has_consent = Specification::<Applicant>::from_fn(|p| p.field("has_consent")).unwrap();
//!
//! let minor = Applicant { age: 17, has_consent: true };
//! assert!(!(&is_adult & &has_consent).is_satisfied_by(&minor));
//! assert!((&is_adult | &has_consent).is_satisfied_by(&minor));
//! assert!((!&is_adult).is_satisfied_by(&minor));
//! ```

// Lets derive output (`::specforge::...`) resolve inside this crate's tests.
extern crate self as specforge;

mod catalog;
mod rule;
mod specification;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use rule::Rule;
pub use specification::Specification;

// User-facing derive
pub use specforge_macros::Entity;

pub use specforge_config::{ConfigError, SpecConfig};
// The trait and the derive share a name; they live in different namespaces.
pub use specforge_core::{
    CompareOp, CompileMode, CompileOptions, Entity, Expr, FieldDef, LogicalOp,
    MalformedExpression, Param, ParamId, PredicateExpr, SpecError, Value, ValueKind,
};

/// Lower-level building blocks: the predicate representation and its
/// combinators.
pub mod core {
    pub use specforge_core::combinator;
    pub use specforge_core::compile::{compile, CompiledPredicate};
    pub use specforge_core::eval::{eval_predicate, eval_value};
    pub use specforge_core::validate::validate;
    pub use specforge_core::Predicate;
}

#[cfg(feature = "console")]
pub use specforge_console as console;

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use specforge_core::{Entity, FieldDef, Value, ValueKind};
}

pub mod prelude {
    pub use super::{Catalog, Entity, Rule, Specification};
    pub use super::{Expr, Param, PredicateExpr, SpecError, Value};
}
