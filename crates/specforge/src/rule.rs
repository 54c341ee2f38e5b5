//! Named, reusable rule definitions.

use specforge_core::{Entity, Expr, Param};

/// A rule over `E`, written as a boolean body against a parameter.
///
/// Implement this on a unit struct to give a rule a name and reuse it:
///
/// ```
/// use specforge::prelude::*;
///
/// #[derive(Entity)]
/// struct Order {
///     total: f64,
/// }
///
/// struct LargeOrder;
///
/// impl Rule<Order> for LargeOrder {
///     fn body(&self, order: &Param) -> Expr {
///         Expr::gt(order.field("total"), Expr::float(1000.0))
///     }
/// }
///
/// let large = Specification::new(LargeOrder).unwrap();
/// assert!(large.is_satisfied_by(&Order { total: 1500.0 }));
/// ```
pub trait Rule<E: Entity> {
    /// Builds the rule body. Member nodes must reference `param`.
    fn body(&self, param: &Param) -> Expr;

    /// Name used when the rule is registered in a [`Catalog`](crate::Catalog).
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }
}

/// Adapts a closure to [`Rule`].
pub(crate) struct FnRule<F>(pub(crate) F);

impl<E, F> Rule<E> for FnRule<F>
where
    E: Entity,
    F: Fn(&Param) -> Expr,
{
    fn body(&self, param: &Param) -> Expr {
        (self.0)(param)
    }
}
