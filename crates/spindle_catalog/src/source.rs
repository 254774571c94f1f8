//! Provider set sources.
//!
//! The planner never parses source code itself. A front end implements
//! [`UnitLoader`] to analyse one compilation unit at a time and report the
//! provider sets it declares. [`ProviderSetCache`] wraps a loader and
//! memoizes each unit, so a unit is analysed at most once per cache no matter
//! how many sets or injectors reference it.
//!
//! # Scoping
//!
//! A cache belongs to one generation run. It can be shared by reference
//! between the injectors of that run (lookups only need `&self`), but it is
//! never a process-wide singleton: create a new cache when the underlying
//! sources may have changed.

use std::sync::Arc;

use hashbrown::HashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use spindle_types::provider::{ProviderSet, ProviderSetRef};
use spindle_types::unit::UnitPath;

use crate::error::LoadError;

// ─────────────────────────────────────────────────────────────────────────────
// UnitSets
// ─────────────────────────────────────────────────────────────────────────────

/// The provider sets declared by one compilation unit, keyed by set name.
#[derive(Debug, Clone, Default)]
pub struct UnitSets {
    sets: IndexMap<Arc<str>, Arc<ProviderSet>>,
}

impl UnitSets {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a set, keyed by its name.
    ///
    /// Returns the set previously registered under the same name, if any.
    pub fn insert(&mut self, set: ProviderSet) -> Option<Arc<ProviderSet>> {
        let name: Arc<str> = set.id().name().into();
        self.sets.insert(name, Arc::new(set))
    }

    /// Returns the set named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ProviderSet>> {
        self.sets.get(name)
    }

    /// Returns the number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if the unit declares no sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates over the sets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProviderSet>> {
        self.sets.values()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Per-unit analysis supplied by the front end.
///
/// Must be deterministic: loading the same unit twice yields equal sets.
pub trait UnitLoader {
    /// Analyses `unit` and returns the provider sets it declares.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the unit cannot be found or analysed.
    fn load_unit(&self, unit: &UnitPath) -> Result<UnitSets, LoadError>;
}

/// Looks up provider sets by reference. This is what [`merge`](crate::merge)
/// consumes.
pub trait ProviderSetSource {
    /// Returns the set identified by `set`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the set's unit cannot be loaded or does not
    /// declare the set.
    fn provider_set(&self, set: &ProviderSetRef) -> Result<Arc<ProviderSet>, LoadError>;
}

impl<T: ProviderSetSource + ?Sized> ProviderSetSource for &T {
    fn provider_set(&self, set: &ProviderSetRef) -> Result<Arc<ProviderSet>, LoadError> {
        (**self).provider_set(set)
    }
}

fn find_set(unit: &UnitPath, sets: &UnitSets, name: &str) -> Result<Arc<ProviderSet>, LoadError> {
    sets.get(name).cloned().ok_or_else(|| LoadError::NoSuchSet {
        unit: unit.clone(),
        name: name.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// ProviderSetCache
// ─────────────────────────────────────────────────────────────────────────────

/// Memoizing wrapper around a [`UnitLoader`].
///
/// Both successful and failed loads are cached, so a broken unit is analysed
/// (and reported) once.
pub struct ProviderSetCache<L> {
    loader: L,
    units: RwLock<HashMap<UnitPath, Result<Arc<UnitSets>, LoadError>>>,
}

impl<L: core::fmt::Debug> core::fmt::Debug for ProviderSetCache<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderSetCache")
            .field("loader", &self.loader)
            .field("cached_units", &self.units.read().len())
            .finish()
    }
}

impl<L: UnitLoader> ProviderSetCache<L> {
    /// Creates an empty cache over `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            units: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the sets declared by `unit`, loading the unit on first use.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`LoadError`] if the unit failed to load.
    pub fn unit(&self, unit: &UnitPath) -> Result<Arc<UnitSets>, LoadError> {
        if let Some(cached) = self.units.read().get(unit) {
            return cached.clone();
        }

        // The lock is not held while the front end works.
        let loaded = self.loader.load_unit(unit).map(Arc::new);
        match &loaded {
            Ok(sets) => tracing::debug!(unit = %unit, sets = sets.len(), "loaded unit"),
            Err(err) => tracing::debug!(unit = %unit, error = %err, "unit failed to load"),
        }

        self.units
            .write()
            .entry(unit.clone())
            .or_insert(loaded)
            .clone()
    }

    /// Returns the number of units loaded (or attempted) so far.
    #[must_use]
    pub fn cached_units(&self) -> usize {
        self.units.read().len()
    }

    /// Returns the wrapped loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: UnitLoader> ProviderSetSource for ProviderSetCache<L> {
    fn provider_set(&self, set: &ProviderSetRef) -> Result<Arc<ProviderSet>, LoadError> {
        let sets = self.unit(set.unit())?;
        find_set(set.unit(), &sets, set.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MemoryUnits
// ─────────────────────────────────────────────────────────────────────────────

/// An in-memory front end.
///
/// Holds already-built provider sets per unit. Useful for embedders that
/// assemble declarations themselves, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnits {
    units: HashMap<UnitPath, Result<UnitSets, String>>,
}

impl MemoryUnits {
    /// Creates an empty front end.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `set` under its unit.
    ///
    /// Returns the set previously registered under the same reference.
    pub fn insert_set(&mut self, set: ProviderSet) -> Option<Arc<ProviderSet>> {
        let unit = set.id().unit().clone();
        let entry = self
            .units
            .entry(unit)
            .or_insert_with(|| Ok(UnitSets::new()));
        if entry.is_err() {
            *entry = Ok(UnitSets::new());
        }
        entry.as_mut().ok().and_then(|sets| sets.insert(set))
    }

    /// Marks `unit` as failing analysis with `message`.
    pub fn fail_unit(&mut self, unit: UnitPath, message: impl Into<String>) {
        self.units.insert(unit, Err(message.into()));
    }

    /// Returns the units known to this front end.
    pub fn units(&self) -> impl Iterator<Item = &UnitPath> {
        self.units.keys()
    }
}

impl UnitLoader for MemoryUnits {
    fn load_unit(&self, unit: &UnitPath) -> Result<UnitSets, LoadError> {
        match self.units.get(unit) {
            Some(Ok(sets)) => Ok(sets.clone()),
            Some(Err(message)) => Err(LoadError::Analysis {
                unit: unit.clone(),
                message: message.clone(),
            }),
            None => Err(LoadError::UnitNotFound(unit.clone())),
        }
    }
}

impl ProviderSetSource for MemoryUnits {
    fn provider_set(&self, set: &ProviderSetRef) -> Result<Arc<ProviderSet>, LoadError> {
        match self.units.get(set.unit()) {
            Some(Ok(sets)) => find_set(set.unit(), sets, set.name()),
            Some(Err(message)) => Err(LoadError::Analysis {
                unit: set.unit().clone(),
                message: message.clone(),
            }),
            None => Err(LoadError::UnitNotFound(set.unit().clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Counts how often each load happens.
    struct CountingLoader {
        inner: MemoryUnits,
        loads: Cell<usize>,
    }

    impl UnitLoader for CountingLoader {
        fn load_unit(&self, unit: &UnitPath) -> Result<UnitSets, LoadError> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load_unit(unit)
        }
    }

    fn app() -> UnitPath {
        UnitPath::new("example.com/app")
    }

    fn loader() -> CountingLoader {
        let mut inner = MemoryUnits::new();
        inner.insert_set(ProviderSet::builder(ProviderSetRef::module(app())).build());
        inner.insert_set(ProviderSet::builder(ProviderSetRef::new(app(), "Extra")).build());
        inner.fail_unit(UnitPath::new("example.com/broken"), "syntax error");
        CountingLoader {
            inner,
            loads: Cell::new(0),
        }
    }

    #[test]
    fn loads_each_unit_once() {
        let cache = ProviderSetCache::new(loader());

        cache.provider_set(&ProviderSetRef::module(app())).unwrap();
        cache.provider_set(&ProviderSetRef::new(app(), "Extra")).unwrap();
        cache.provider_set(&ProviderSetRef::module(app())).unwrap();

        assert_eq!(cache.loader().loads.get(), 1);
        assert_eq!(cache.cached_units(), 1);
    }

    #[test]
    fn failures_are_cached() {
        let cache = ProviderSetCache::new(loader());
        let broken = ProviderSetRef::module(UnitPath::new("example.com/broken"));

        let first = cache.provider_set(&broken).unwrap_err();
        let second = cache.provider_set(&broken).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(cache.loader().loads.get(), 1);
        assert_eq!(
            first.to_string(),
            "analyze unit \"example.com/broken\": syntax error"
        );
    }

    #[test]
    fn missing_set_in_known_unit() {
        let cache = ProviderSetCache::new(loader());
        let err = cache
            .provider_set(&ProviderSetRef::new(app(), "Nope"))
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::NoSuchSet {
                unit: app(),
                name: "Nope".to_string(),
            }
        );
    }

    #[test]
    fn unknown_unit() {
        let units = MemoryUnits::new();
        let err = units
            .provider_set(&ProviderSetRef::module(UnitPath::new("nowhere")))
            .unwrap_err();
        assert!(matches!(err, LoadError::UnitNotFound(_)));
    }
}
