//! The declaration model for Spindle (Layer 1).
//!
//! `spindle_types` defines the clean, already-resolved data a front end hands
//! to the planner:
//!
//! - [`ty`] - Type identity keys for producible values
//! - [`unit`] - Compilation unit identity and source positions
//! - [`provider`] - Provider declarations, provider sets and set references
//! - [`injector`] - The signature of an injector to synthesize
//!
//! # Architecture
//!
//! - **Layer 1** (`spindle_types`): declaration model (this crate)
//! - **Layer 2** (`spindle_catalog`, `spindle_solver`): catalog merge and call-plan solving
//! - **Layer 3** (`spindle_codegen`): injector source emission
//! - **Layer 4** (`spindle_core`): the generation pipeline
//!
//! # Example
//!
//! ```
//! use spindle_types::prelude::*;
//!
//! let unit = UnitPath::new("example.com/app");
//! let config = Type::named(unit.clone(), "Config", Shape::Struct);
//! let server = Type::pointer(Type::named(unit.clone(), "Server", Shape::Struct));
//!
//! let provider = ProviderDecl::new(
//!     unit.clone(),
//!     "NewServer",
//!     Position::new("app/server.go", 12, 1),
//!     vec![config],
//!     server,
//!     true,
//! )
//! .unwrap();
//!
//! let mut set = ProviderSet::builder(ProviderSetRef::module(unit));
//! set.provide(provider).unwrap();
//! assert_eq!(set.build().providers().len(), 1);
//! ```

/// Declaration validation errors.
pub mod error;

/// Injector signatures.
pub mod injector;

/// Providers, provider sets and provider set references.
pub mod provider;

/// Type identity.
pub mod ty;

/// Compilation units and source positions.
pub mod unit;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::DeclError;
    pub use crate::injector::{InjectorSpec, Param};
    pub use crate::provider::{
        ProviderDecl, ProviderSet, ProviderSetBuilder, ProviderSetImport, ProviderSetRef,
    };
    pub use crate::ty::{
        BasicKind, ChanDir, Field, FullPath, Method, NamedType, Qualifier, Shape, Signature, Type,
    };
    pub use crate::unit::{Position, UnitPath};
}
