//! Shared fixtures for generator integration tests.

#![allow(dead_code, reason = "shared fixtures, not all used by every test binary")]

use core::cell::Cell;
use std::sync::Arc;

use spindle_catalog::{LoadError, MemoryUnits, ProviderSetSource};
use spindle_core::{Injector, TracingConfig, TracingFormat, init_tracing};
use spindle_types::prelude::*;

pub const APP: &str = "example.com/app";
pub const DB: &str = "example.com/db";
pub const LOG: &str = "example.com/log";

/// Sends pipeline traces to the captured test output. Only the first call
/// in a test binary installs anything.
pub fn trace() {
    let _ = init_tracing(
        &TracingConfig::default()
            .with_level(tracing::Level::TRACE)
            .with_format(TracingFormat::Compact)
            .with_test_writer(true),
    );
}

pub fn unit(path: &str) -> UnitPath {
    UnitPath::new(path)
}

pub fn module(path: &str) -> ProviderSetRef {
    ProviderSetRef::module(unit(path))
}

pub fn pos(path: &str, line: u32) -> Position {
    Position::new(format!("{path}/wire.go"), line, 1)
}

pub fn ty(path: &str, name: &str) -> Type {
    Type::named(unit(path), name, Shape::Struct)
}

pub fn ptr(path: &str, name: &str) -> Type {
    Type::pointer(ty(path, name))
}

fn decl(
    path: &str,
    name: &str,
    line: u32,
    inputs: Vec<Type>,
    output: Type,
    may_fail: bool,
) -> ProviderDecl {
    ProviderDecl::new(unit(path), name, pos(path, line), inputs, output, may_fail)
        .expect("fixture providers have distinct inputs")
}

/// Three units:
///
/// - log: `NewLogger() *Logger`
/// - db: `NewConfig() Config`, `Open(Config, *log.Logger) (*Conn, error)`
/// - app: `NewApp(*db.Conn, *log.Logger) *App`, importing db and log
pub fn world() -> MemoryUnits {
    let mut units = MemoryUnits::new();

    let mut log = ProviderSet::builder(module(LOG));
    log.provide(decl(LOG, "NewLogger", 3, vec![], ptr(LOG, "Logger"), false))
        .expect("distinct outputs");
    units.insert_set(log.build());

    let mut db = ProviderSet::builder(module(DB));
    db.provide(decl(DB, "NewConfig", 3, vec![], ty(DB, "Config"), false))
        .expect("distinct outputs")
        .provide(decl(
            DB,
            "Open",
            7,
            vec![ty(DB, "Config"), ptr(LOG, "Logger")],
            ptr(DB, "Conn"),
            true,
        ))
        .expect("distinct outputs");
    units.insert_set(db.build());

    let mut app = ProviderSet::builder(module(APP));
    app.provide(decl(
        APP,
        "NewApp",
        5,
        vec![ptr(DB, "Conn"), ptr(LOG, "Logger")],
        ptr(APP, "App"),
        false,
    ))
    .expect("distinct outputs");
    app.import(module(DB), pos(APP, 10))
        .import(module(LOG), pos(APP, 11));
    units.insert_set(app.build());

    units
}

/// An injector in the app unit using the app module.
pub fn injector(name: &str, output: Type) -> InjectorSpec {
    InjectorSpec::new(unit(APP), name, output)
}

pub fn uses_app(spec: InjectorSpec) -> Injector {
    Injector::new(spec, vec![module(APP)])
}

/// Counts provider set lookups.
pub struct Counting {
    pub inner: MemoryUnits,
    pub lookups: Cell<usize>,
}

impl Counting {
    pub fn new(inner: MemoryUnits) -> Self {
        Self {
            inner,
            lookups: Cell::new(0),
        }
    }
}

impl ProviderSetSource for Counting {
    fn provider_set(&self, set: &ProviderSetRef) -> Result<Arc<ProviderSet>, LoadError> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.provider_set(set)
    }
}
