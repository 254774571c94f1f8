//! Shared fixtures for emitter integration tests.

#![allow(dead_code, reason = "shared fixtures, not all used by every test binary")]

use indexmap::IndexMap;
use spindle_catalog::{MemoryUnits, merge};
use spindle_solver::{Plan, solve};
use spindle_types::prelude::*;

pub const APP: &str = "example.com/app";
pub const DB: &str = "example.com/db";
pub const LOG: &str = "example.com/log";

pub fn unit(path: &str) -> UnitPath {
    UnitPath::new(path)
}

/// A named type declared in `path`.
pub fn named(path: &str, name: &str, shape: Shape) -> Type {
    Type::named(unit(path), name, shape)
}

/// A struct type declared in `path`.
pub fn ty(path: &str, name: &str) -> Type {
    named(path, name, Shape::Struct)
}

/// Providers spread over several units. The app unit's `Module` set imports
/// every other unit's `Module`.
#[derive(Default)]
pub struct World {
    sets: IndexMap<String, ProviderSetBuilder>,
    line: u32,
}

pub fn world() -> World {
    World::default()
}

impl World {
    pub fn provides(self, path: &str, function: &str, inputs: Vec<Type>, output: Type) -> Self {
        self.provider(path, function, inputs, output, false)
    }

    pub fn fails(self, path: &str, function: &str, inputs: Vec<Type>, output: Type) -> Self {
        self.provider(path, function, inputs, output, true)
    }

    fn provider(
        mut self,
        path: &str,
        function: &str,
        inputs: Vec<Type>,
        output: Type,
        may_fail: bool,
    ) -> Self {
        self.line += 1;
        let decl = ProviderDecl::new(
            unit(path),
            function,
            Position::new(format!("{path}/wire.go"), self.line, 1),
            inputs,
            output,
            may_fail,
        )
        .expect("fixture providers have distinct inputs");
        self.sets
            .entry(path.to_string())
            .or_insert_with(|| ProviderSet::builder(ProviderSetRef::module(unit(path))))
            .provide(decl)
            .expect("fixture sets have distinct outputs");
        self
    }

    /// Merges everything and solves `spec`.
    pub fn solve(self, spec: &InjectorSpec) -> Plan {
        let mut units = MemoryUnits::new();
        let mut app = ProviderSet::builder(ProviderSetRef::module(unit(APP)));
        let mut line = 100;
        for (path, builder) in self.sets {
            if path == APP {
                app = builder;
                continue;
            }
            units.insert_set(builder.build());
        }
        for path in units.units().cloned().collect::<Vec<_>>() {
            line += 1;
            app.import(ProviderSetRef::module(path), Position::new("app/wire.go", line, 1));
        }
        units.insert_set(app.build());

        let catalog = merge(&units, &[ProviderSetRef::module(unit(APP))]).expect("fixture merges");
        solve(&catalog, &spec.given(), spec.output()).expect("fixture solves")
    }
}

/// An injector in the app unit.
pub fn injector(name: &str, output: Type) -> InjectorSpec {
    InjectorSpec::new(unit(APP), name, output)
}
