//! Named specifications, combined by name.

use std::collections::BTreeMap;
use std::fmt;

use specforge_core::combinator::{try_all, try_any, try_not};
use specforge_core::{Entity, Predicate, SpecError};
use tracing::debug;

use crate::rule::Rule;
use crate::specification::Specification;

/// A registry of specifications over `E`, addressed by name.
///
/// Lookups that combine entries fail with [`SpecError::InvalidArgument`]
/// when a name is not registered.
pub struct Catalog<E> {
    entries: BTreeMap<String, Specification<E>>,
}

impl<E: Entity> Catalog<E> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers `spec` under `name`, returning any entry it replaces.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        spec: Specification<E>,
    ) -> Option<Specification<E>> {
        let name = name.into();
        debug!(entity = E::entity_name(), name = %name, spec = %spec, "registered specification");
        self.entries.insert(name, spec)
    }

    /// Builds `rule` and registers it under [`Rule::name`].
    pub fn register<R: Rule<E>>(&mut self, rule: R) -> Result<(), SpecError> {
        let name = rule.name().to_string();
        let spec = Specification::new(rule)?;
        self.insert(name, spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Specification<E>> {
        self.entries.get(name)
    }

    /// # Errors
    ///
    /// Returns [`SpecError::InvalidArgument`] if `name` is not registered.
    pub fn require(&self, name: &str) -> Result<&Specification<E>, SpecError> {
        self.get(name).ok_or_else(|| unknown(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Conjunction of the named entries as one flat node, left to right.
    /// [`Specification::empty`] when `names` is empty.
    pub fn all_of(&self, names: &[&str]) -> Result<Specification<E>, SpecError> {
        try_all(&self.lookup_all(names))
            .map(Specification::from)
            .map_err(|err| self.name_missing(names, err))
    }

    /// Disjunction of the named entries as one flat node, left to right.
    /// [`Specification::none`] when `names` is empty.
    pub fn any_of(&self, names: &[&str]) -> Result<Specification<E>, SpecError> {
        try_any(&self.lookup_all(names))
            .map(Specification::from)
            .map_err(|err| self.name_missing(names, err))
    }

    /// Negation of the named entry.
    pub fn negate(&self, name: &str) -> Result<Specification<E>, SpecError> {
        try_not(self.lookup(name))
            .map(Specification::from)
            .map_err(|err| named(err, name))
    }

    fn lookup(&self, name: &str) -> Option<&Predicate<E>> {
        self.get(name).map(Specification::as_predicate)
    }

    fn lookup_all(&self, names: &[&str]) -> Vec<Option<&Predicate<E>>> {
        names.iter().map(|name| self.lookup(name)).collect()
    }

    fn name_missing(&self, names: &[&str], err: SpecError) -> SpecError {
        match names.iter().find(|name| self.get(name).is_none()) {
            Some(name) => named(err, name),
            None => err,
        }
    }
}

impl<E: Entity> Default for Catalog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Catalog<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

fn unknown(name: &str) -> SpecError {
    SpecError::InvalidArgument(format!("unknown specification `{name}`"))
}

fn named(err: SpecError, name: &str) -> SpecError {
    match err {
        SpecError::InvalidArgument(reason) => {
            SpecError::InvalidArgument(format!("unknown specification `{name}`: {reason}"))
        }
        other => other,
    }
}
