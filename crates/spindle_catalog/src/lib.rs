//! Provider set resolution and catalog merging for Spindle (Layer 2).
//!
//! `spindle_catalog` turns a handful of root provider set references into one
//! flat [`ProviderCatalog`], following import edges between sets across
//! compilation units.
//!
//! - [`source`] - The front-end contract ([`UnitLoader`]) and the per-run
//!   [`ProviderSetCache`]
//! - [`catalog`] - The merged type → provider table and [`merge`]
//! - [`error`] - Resolution and conflict errors
//!
//! # Example
//!
//! ```
//! use spindle_catalog::prelude::*;
//! use spindle_types::prelude::*;
//!
//! let unit = UnitPath::new("example.com/app");
//! let config = Type::named(unit.clone(), "Config", Shape::Struct);
//!
//! let mut set = ProviderSet::builder(ProviderSetRef::module(unit.clone()));
//! set.provide(
//!     ProviderDecl::new(unit.clone(), "NewConfig", Position::new("app.go", 3, 1), vec![], config.clone(), false)
//!         .unwrap(),
//! )
//! .unwrap();
//!
//! let mut units = MemoryUnits::new();
//! units.insert_set(set.build());
//!
//! let cache = ProviderSetCache::new(units);
//! let catalog = merge(&cache, &[ProviderSetRef::module(unit)]).unwrap();
//! assert_eq!(catalog.get(&config).unwrap().name(), "NewConfig");
//! ```

/// The merged provider catalog.
pub mod catalog;

/// Catalog errors.
pub mod error;

/// Provider set sources and caching.
pub mod source;

pub use catalog::{Binding, BindingOrigin, BindingSite, ProviderCatalog, merge};
pub use error::{CatalogError, LoadError};
pub use source::{MemoryUnits, ProviderSetCache, ProviderSetSource, UnitLoader, UnitSets};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::error::*;
    pub use crate::source::*;
}
