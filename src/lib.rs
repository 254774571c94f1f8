//! A build-time dependency injection planner.
//!
//! Spindle takes provider functions grouped into provider sets, merges the
//! sets an injector uses into one catalog, solves the ordered list of calls
//! that builds the injector's result from its parameters, and renders that
//! plan as source text.
//!
//! ```
//! use spindle::prelude::*;
//!
//! let app = UnitPath::new("example.com/app");
//! let db = UnitPath::new("example.com/db");
//! let conn = Type::pointer(Type::named(db.clone(), "Conn", Shape::Struct));
//! let dsn = Type::named(db.clone(), "DSN", Shape::Basic(BasicKind::String));
//!
//! let mut set = ProviderSet::builder(ProviderSetRef::module(db.clone()));
//! set.provide(
//!     ProviderDecl::new(
//!         db.clone(),
//!         "Open",
//!         Position::new("db/db.go", 12, 1),
//!         vec![dsn.clone()],
//!         conn.clone(),
//!         true,
//!     )
//!     .unwrap(),
//! )
//! .unwrap();
//! let mut units = MemoryUnits::new();
//! units.insert_set(set.build());
//!
//! let catalog = merge(&units, &[ProviderSetRef::module(db)]).unwrap();
//! let spec = InjectorSpec::new(app, "InitConn", conn)
//!     .with_param("dsn", dsn)
//!     .fallible();
//! let plan = solve(&catalog, &spec.given(), spec.output()).unwrap();
//!
//! assert_eq!(
//!     emit(&spec, &plan).unwrap(),
//!     "func InitConn(dsn pkg0.DSN) (*pkg0.Conn, error) {\n\
//!      \tv0, err := pkg0.Open(dsn)\n\
//!      \tif err != nil {\n\
//!      \t\treturn nil, err\n\
//!      \t}\n\
//!      \treturn v0, nil\n\
//!      }\n"
//! );
//! ```

pub use spindle_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use spindle_internal::prelude::*;
}
