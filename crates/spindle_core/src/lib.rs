//! Generation pipeline for Spindle (Layer 4).
//!
//! [`Generator`] ties the layers together for one output unit: it merges the
//! provider sets each injector uses, solves a plan per injector, renders the
//! injectors against one shared import table and frames the result as a
//! complete source file.
//!
//! # Example
//!
//! ```
//! use spindle_core::prelude::*;
//! use spindle_types::prelude::*;
//!
//! let app = UnitPath::new("example.com/app");
//! let config = Type::named(app.clone(), "Config", Shape::Struct);
//!
//! let mut set = ProviderSet::builder(ProviderSetRef::module(app.clone()));
//! set.provide(
//!     ProviderDecl::new(
//!         app.clone(),
//!         "NewConfig",
//!         Position::new("app/wire.go", 3, 1),
//!         vec![],
//!         config.clone(),
//!         false,
//!     )
//!     .unwrap(),
//! )
//! .unwrap();
//!
//! let mut units = MemoryUnits::new();
//! units.insert_set(set.build());
//!
//! let generator = Generator::new(&units, app.clone(), GeneratorConfig::default());
//! let injector = Injector::new(
//!     InjectorSpec::new(app.clone(), "InitConfig", config),
//!     vec![ProviderSetRef::module(app)],
//! );
//!
//! let file = generator.generate("app", &[injector]).unwrap().unwrap();
//! assert!(file.contains("func InitConfig() Config {"));
//! ```
//!
//! # Modules
//!
//! - [`generator`] - The [`Generator`] pipeline and [`Injector`] requests
//! - [`config`] - [`GeneratorConfig`]
//! - [`error`] - [`GenerateError`]
//! - [`tracing_setup`] - Subscriber installation, scoped to the spindle crates

/// Generator configuration.
pub mod config;

/// Generation errors.
pub mod error;

/// The generation pipeline.
pub mod generator;

/// Tracing subscriber setup.
pub mod tracing_setup;

pub use config::GeneratorConfig;
pub use error::{GenerateError, InjectorError};
pub use generator::{Generator, Injector};
pub use tracing_setup::{TracingConfig, TracingFormat, init_tracing};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::GeneratorConfig;
    pub use crate::error::{GenerateError, InjectorError};
    pub use crate::generator::{Generator, Injector};
    pub use crate::tracing_setup::{TracingConfig, TracingFormat, init_tracing};
    pub use spindle_catalog::{MemoryUnits, ProviderSetCache, ProviderSetSource, UnitLoader, UnitSets};
}
