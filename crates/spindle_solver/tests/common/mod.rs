//! Shared fixtures for solver integration tests.

#![allow(dead_code, reason = "shared fixtures, not all used by every test binary")]

use spindle_catalog::{MemoryUnits, ProviderCatalog, merge};
use spindle_types::prelude::*;

pub const APP: &str = "example.com/app";

pub fn app() -> UnitPath {
    UnitPath::new(APP)
}

/// A struct type named `name` declared in the app unit.
pub fn ty(name: &str) -> Type {
    Type::named(app(), name, Shape::Struct)
}

/// Builds a single-set catalog.
///
/// Each entry is `(function, inputs, output, may_fail)`; types are named
/// after the strings given.
pub struct CatalogFixture {
    builder: ProviderSetBuilder,
    line: u32,
}

pub fn catalog() -> CatalogFixture {
    CatalogFixture {
        builder: ProviderSet::builder(ProviderSetRef::module(app())),
        line: 0,
    }
}

impl CatalogFixture {
    pub fn provides(self, function: &str, inputs: &[&str], output: &str) -> Self {
        self.provider(function, inputs, output, false)
    }

    pub fn fails(self, function: &str, inputs: &[&str], output: &str) -> Self {
        self.provider(function, inputs, output, true)
    }

    fn provider(mut self, function: &str, inputs: &[&str], output: &str, may_fail: bool) -> Self {
        self.line += 1;
        let decl = ProviderDecl::new(
            app(),
            function,
            Position::new("app/wire.go", self.line, 1),
            inputs.iter().map(|input| ty(input)).collect(),
            ty(output),
            may_fail,
        )
        .expect("fixture providers have distinct inputs");
        self.builder
            .provide(decl)
            .expect("fixture sets have distinct outputs");
        self
    }

    pub fn build(self) -> ProviderCatalog {
        let mut units = MemoryUnits::new();
        units.insert_set(self.builder.build());
        merge(&units, &[ProviderSetRef::module(app())]).expect("fixture catalog merges")
    }
}

/// Types for the given names.
pub fn types(names: &[&str]) -> Vec<Type> {
    names.iter().map(|name| ty(name)).collect()
}

/// Output type names of a plan's calls, in order.
pub fn outputs(plan: &spindle_solver::Plan) -> Vec<String> {
    plan.calls()
        .iter()
        .map(|call| {
            call.output
                .as_named()
                .map(|named| named.name().to_string())
                .unwrap_or_default()
        })
        .collect()
}
