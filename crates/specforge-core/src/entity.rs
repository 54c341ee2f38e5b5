//! Entity trait: the typed subject a specification is evaluated against.

use crate::value::{Value, ValueKind};

/// Static description of one readable field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: ValueKind,
    /// Whether the field may read as [`Value::Null`].
    pub nullable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}

/// A type whose fields can be referenced by member nodes.
///
/// Usually implemented with `#[derive(Entity)]`. Hand-written impls must keep
/// [`Entity::read_field`] consistent with the table returned by
/// [`Entity::fields`]: index `i` reads `fields()[i]`.
///
/// # Example
///
/// ```
/// use specforge_core::{Entity, FieldDef, Value, ValueKind};
///
/// struct Person {
///     age: u32,
/// }
///
/// impl Entity for Person {
///     fn entity_name() -> &'static str {
///         "Person"
///     }
///
///     fn fields() -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[FieldDef::new("age", ValueKind::Int)];
///         FIELDS
///     }
///
///     fn read_field(&self, index: usize) -> Value {
///         match index {
///             0 => Value::Int(self.age as i64),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// assert_eq!(Person::field_index("age"), Some(0));
/// assert_eq!(Person { age: 30 }.field("age"), Some(Value::Int(30)));
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Name used in diagnostics.
    fn entity_name() -> &'static str;

    /// Field table, in index order.
    fn fields() -> &'static [FieldDef];

    /// Reads the field at `index`. Out-of-range indices read as `Null`.
    fn read_field(&self, index: usize) -> Value;

    /// Looks up a field definition by name.
    fn field_def(name: &str) -> Option<&'static FieldDef> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Resolves a field name to its index.
    fn field_index(name: &str) -> Option<usize> {
        Self::fields().iter().position(|f| f.name == name)
    }

    /// Reads a field by name.
    fn field(&self, name: &str) -> Option<Value> {
        Self::field_index(name).map(|idx| self.read_field(idx))
    }
}
