//! Unit alias tables.
//!
//! Every unit other than the one being generated into is imported under a
//! short alias (`pkg0`, `pkg1`, ...). The table is built in one go before any
//! text is rendered: unit paths are sorted and numbered in that order, so the
//! same set of units always yields the same aliases.

use indexmap::IndexMap;
use spindle_solver::Plan;
use spindle_types::injector::InjectorSpec;
use spindle_types::ty::Qualifier;
use spindle_types::unit::UnitPath;

/// Maps referenced units to their import aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTable {
    current: UnitPath,
    /// Sorted by unit path.
    aliases: IndexMap<UnitPath, String>,
}

impl ImportTable {
    /// Alias prefix used when none is configured.
    pub const DEFAULT_PREFIX: &'static str = "pkg";

    /// Builds a table for code generated into `current`.
    ///
    /// `units` may repeat and may include `current` or the universe, neither
    /// of which is ever aliased.
    #[must_use]
    pub fn new(current: UnitPath, prefix: &str, units: impl IntoIterator<Item = UnitPath>) -> Self {
        let mut units: Vec<UnitPath> = units
            .into_iter()
            .filter(|u| *u != current && !u.is_universe())
            .collect();
        units.sort();
        units.dedup();

        let aliases = units
            .into_iter()
            .enumerate()
            .map(|(i, unit)| (unit, format!("{prefix}{i}")))
            .collect();
        Self { current, aliases }
    }

    /// Builds the table for a single injector with the default prefix.
    #[must_use]
    pub fn for_injector(spec: &InjectorSpec, plan: &Plan) -> Self {
        Self::new(
            spec.unit().clone(),
            Self::DEFAULT_PREFIX,
            referenced_units(spec, plan),
        )
    }

    /// Returns the unit code is generated into.
    #[must_use]
    pub fn current(&self) -> &UnitPath {
        &self.current
    }

    /// Returns the alias of `unit`, or `None` for the current unit and
    /// units not in the table.
    #[must_use]
    pub fn alias(&self, unit: &UnitPath) -> Option<&str> {
        self.aliases.get(unit).map(String::as_str)
    }

    /// Returns true if names from `unit` can be rendered with this table.
    #[must_use]
    pub fn covers(&self, unit: &UnitPath) -> bool {
        unit.is_universe() || *unit == self.current || self.aliases.contains_key(unit)
    }

    /// Iterates over `(unit, alias)` pairs sorted by unit path.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitPath, &str)> {
        self.aliases.iter().map(|(unit, alias)| (unit, alias.as_str()))
    }

    /// Returns the number of imported units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if nothing needs importing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Qualifier for ImportTable {
    fn qualify<'a>(&'a self, unit: &'a UnitPath) -> Option<&'a str> {
        self.alias(unit)
    }
}

/// Lists the units an injector's rendered text refers to: provider units,
/// parameter types and the result type. May repeat.
#[must_use]
pub fn referenced_units(spec: &InjectorSpec, plan: &Plan) -> Vec<UnitPath> {
    let mut units = Vec::new();
    for call in plan.calls() {
        units.push(call.provider.unit.clone());
    }
    for param in spec.params() {
        param.ty.collect_units(&mut units);
    }
    spec.output().collect_units(&mut units);
    units
}
