//! Providers, provider sets and provider set references.
//!
//! A [`ProviderDecl`] describes one constructor function. Providers are
//! grouped into named [`ProviderSet`]s, which may import other sets by
//! [`ProviderSetRef`]. Sets are assembled with a [`ProviderSetBuilder`], which
//! enforces the per-set invariants:
//!
//! - no provider declares two parameters of the same type
//! - no two providers in one set produce the same type
//! - an import of an already-imported set is ignored

use core::fmt;
use std::sync::Arc;

use crate::error::DeclError;
use crate::ty::Type;
use crate::unit::{Position, UnitPath};

// ─────────────────────────────────────────────────────────────────────────────
// ProviderDecl
// ─────────────────────────────────────────────────────────────────────────────

/// A constructor function producing one type from zero or more other types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDecl {
    unit: UnitPath,
    name: Arc<str>,
    pos: Position,
    inputs: Vec<Type>,
    output: Type,
    may_fail: bool,
}

impl ProviderDecl {
    /// Creates a provider declaration.
    ///
    /// `may_fail` marks providers whose invocation can short-circuit with an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::DuplicateInput`] if two inputs are the same type.
    pub fn new(
        unit: UnitPath,
        name: impl Into<Arc<str>>,
        pos: Position,
        inputs: Vec<Type>,
        output: Type,
        may_fail: bool,
    ) -> Result<Self, DeclError> {
        let name = name.into();
        for (i, input) in inputs.iter().enumerate() {
            if inputs[..i].contains(input) {
                return Err(DeclError::DuplicateInput {
                    name: name.to_string(),
                    pos,
                    ty: input.clone(),
                });
            }
        }
        Ok(Self {
            unit,
            name,
            pos,
            inputs,
            output,
            may_fail,
        })
    }

    /// Returns the unit declaring the provider function.
    #[must_use]
    pub fn unit(&self) -> &UnitPath {
        &self.unit
    }

    /// Returns the provider function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the provider is declared.
    #[must_use]
    pub fn pos(&self) -> &Position {
        &self.pos
    }

    /// Returns the consumed types, in parameter order.
    #[must_use]
    pub fn inputs(&self) -> &[Type] {
        &self.inputs
    }

    /// Returns the produced type.
    #[must_use]
    pub fn output(&self) -> &Type {
        &self.output
    }

    /// Returns whether invoking the provider can fail.
    #[must_use]
    pub fn may_fail(&self) -> bool {
        self.may_fail
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProviderSetRef
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies a named provider set within a unit.
///
/// Compared structurally on `(unit, name)`. Displays as `"unit/path".Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderSetRef {
    unit: UnitPath,
    name: Arc<str>,
}

impl ProviderSetRef {
    /// Name of the set providers join when their directive names no set.
    pub const DEFAULT_NAME: &'static str = "Module";

    /// Creates a reference to set `name` in `unit`.
    #[must_use]
    pub fn new(unit: UnitPath, name: impl Into<Arc<str>>) -> Self {
        Self {
            unit,
            name: name.into(),
        }
    }

    /// Creates a reference to the implicitly named set of `unit`.
    #[must_use]
    pub fn module(unit: UnitPath) -> Self {
        Self::new(unit, Self::DEFAULT_NAME)
    }

    /// Returns the unit declaring the set.
    #[must_use]
    pub fn unit(&self) -> &UnitPath {
        &self.unit
    }

    /// Returns the set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ProviderSetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{}", self.unit.as_str(), self.name)
    }
}

/// An import edge from one provider set to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSetImport {
    /// The imported set.
    pub set: ProviderSetRef,
    /// Position of the import directive.
    pub pos: Position,
}

// ─────────────────────────────────────────────────────────────────────────────
// ProviderSet
// ─────────────────────────────────────────────────────────────────────────────

/// A named collection of providers plus imports of other sets.
///
/// Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSet {
    id: ProviderSetRef,
    providers: Vec<Arc<ProviderDecl>>,
    imports: Vec<ProviderSetImport>,
}

impl ProviderSet {
    /// Starts building the set identified by `id`.
    #[must_use]
    pub fn builder(id: ProviderSetRef) -> ProviderSetBuilder {
        ProviderSetBuilder {
            set: ProviderSet {
                id,
                providers: Vec::new(),
                imports: Vec::new(),
            },
        }
    }

    /// Returns the reference identifying this set.
    #[must_use]
    pub fn id(&self) -> &ProviderSetRef {
        &self.id
    }

    /// Returns the providers declared directly in this set.
    #[must_use]
    pub fn providers(&self) -> &[Arc<ProviderDecl>] {
        &self.providers
    }

    /// Returns the imports of this set, in declaration order.
    #[must_use]
    pub fn imports(&self) -> &[ProviderSetImport] {
        &self.imports
    }

    /// Returns the provider in this set producing `ty`, if any.
    #[must_use]
    pub fn provider_for(&self, ty: &Type) -> Option<&Arc<ProviderDecl>> {
        self.providers.iter().find(|p| p.output() == ty)
    }
}

/// Builder enforcing the per-set invariants of a [`ProviderSet`].
#[derive(Debug)]
pub struct ProviderSetBuilder {
    set: ProviderSet,
}

impl ProviderSetBuilder {
    /// Adds a provider to the set.
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::DuplicateProvider`] if the set already has a
    /// provider for the same output type.
    pub fn provide(&mut self, provider: ProviderDecl) -> Result<&mut Self, DeclError> {
        if let Some(previous) = self.set.provider_for(provider.output()) {
            return Err(DeclError::DuplicateProvider {
                set: self.set.id.clone(),
                ty: provider.output().clone(),
                pos: provider.pos().clone(),
                previous: previous.pos().clone(),
            });
        }
        self.set.providers.push(Arc::new(provider));
        Ok(self)
    }

    /// Adds an import of another set.
    ///
    /// Importing a set that is already imported keeps the first import.
    pub fn import(&mut self, set: ProviderSetRef, pos: Position) -> &mut Self {
        if !self.set.imports.iter().any(|imp| imp.set == set) {
            self.set.imports.push(ProviderSetImport { set, pos });
        }
        self
    }

    /// Finishes the set.
    #[must_use]
    pub fn build(self) -> ProviderSet {
        self.set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{BasicKind, Shape};

    fn unit() -> UnitPath {
        UnitPath::new("example.com/app")
    }

    fn named(name: &str) -> Type {
        Type::named(unit(), name, Shape::Struct)
    }

    fn pos(line: u32) -> Position {
        Position::new("app/providers.go", line, 1)
    }

    #[test]
    fn rejects_duplicate_inputs() {
        let err = ProviderDecl::new(
            unit(),
            "NewPair",
            pos(3),
            vec![named("A"), Type::basic(BasicKind::Int), named("A")],
            named("Pair"),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, DeclError::DuplicateInput { ref ty, .. } if *ty == named("A")));
        assert_eq!(
            err.to_string(),
            "app/providers.go:3:1: provider NewPair has multiple parameters of type example.com/app.A"
        );
    }

    #[test]
    fn rejects_duplicate_outputs_in_one_set() {
        let mut set = ProviderSet::builder(ProviderSetRef::module(unit()));
        set.provide(ProviderDecl::new(unit(), "NewA", pos(1), vec![], named("A"), false).unwrap())
            .unwrap();

        let err = set
            .provide(
                ProviderDecl::new(unit(), "OtherA", pos(9), vec![], named("A"), true).unwrap(),
            )
            .unwrap_err();

        match err {
            DeclError::DuplicateProvider { pos, previous, .. } => {
                assert_eq!(pos.line(), 9);
                assert_eq!(previous.line(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_imports_are_ignored() {
        let other = ProviderSetRef::new(UnitPath::new("example.com/db"), "Set");
        let mut set = ProviderSet::builder(ProviderSetRef::module(unit()));
        set.import(other.clone(), pos(1)).import(other.clone(), pos(2));

        let set = set.build();
        assert_eq!(set.imports().len(), 1);
        assert_eq!(set.imports()[0].pos.line(), 1);
    }

    #[test]
    fn set_ref_display_quotes_unit() {
        let set = ProviderSetRef::new(UnitPath::new("example.com/db"), "Set");
        assert_eq!(set.to_string(), "\"example.com/db\".Set");
        assert_eq!(ProviderSetRef::module(unit()).name(), "Module");
    }
}
