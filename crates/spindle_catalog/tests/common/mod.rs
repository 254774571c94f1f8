//! Shared fixtures for catalog integration tests.

#![allow(dead_code, reason = "shared fixtures, not all used by every test binary")]

use spindle_catalog::MemoryUnits;
use spindle_types::prelude::*;

pub const APP: &str = "example.com/app";
pub const DB: &str = "example.com/db";
pub const LOG: &str = "example.com/log";

pub fn unit(path: &str) -> UnitPath {
    UnitPath::new(path)
}

/// A struct type named `name` declared in `path`.
pub fn ty(path: &str, name: &str) -> Type {
    Type::named(unit(path), name, Shape::Struct)
}

pub fn pos(path: &str, line: u32) -> Position {
    Position::new(format!("{path}/wire.go"), line, 1)
}

/// An infallible provider declared in `path`.
pub fn provider(path: &str, name: &str, line: u32, inputs: Vec<Type>, output: Type) -> ProviderDecl {
    ProviderDecl::new(unit(path), name, pos(path, line), inputs, output, false)
        .expect("fixture providers have distinct inputs")
}

/// Fluent construction of a provider set.
pub struct SetFixture {
    builder: ProviderSetBuilder,
    path: String,
}

pub fn set(path: &str, name: &str) -> SetFixture {
    SetFixture {
        builder: ProviderSet::builder(ProviderSetRef::new(unit(path), name)),
        path: path.to_string(),
    }
}

impl SetFixture {
    pub fn provides(mut self, name: &str, line: u32, inputs: Vec<Type>, output: Type) -> Self {
        self.builder
            .provide(provider(&self.path, name, line, inputs, output))
            .expect("fixture sets have distinct outputs");
        self
    }

    pub fn imports(mut self, path: &str, name: &str, line: u32) -> Self {
        let at = pos(&self.path, line);
        self.builder
            .import(ProviderSetRef::new(unit(path), name), at);
        self
    }

    pub fn build(self) -> ProviderSet {
        self.builder.build()
    }
}

pub fn units(sets: impl IntoIterator<Item = ProviderSet>) -> MemoryUnits {
    let mut units = MemoryUnits::new();
    for set in sets {
        units.insert_set(set);
    }
    units
}

pub fn root(path: &str, name: &str) -> ProviderSetRef {
    ProviderSetRef::new(unit(path), name)
}
