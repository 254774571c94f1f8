//! # Spindle Internal Library
//!
//! Re-exports the core Spindle crates for convenience.

/// Layer 1: Type identity and provider declarations.
pub use spindle_types;

/// Layer 2: Provider set resolution and catalog merging.
pub use spindle_catalog;

/// Layer 2: Call-plan solving.
pub use spindle_solver;

/// Layer 3: Injector function emission.
pub use spindle_codegen;

/// Layer 4: The generation pipeline.
pub use spindle_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use spindle_catalog::prelude::*;
    pub use spindle_codegen::prelude::*;
    pub use spindle_core::prelude::*;
    pub use spindle_solver::prelude::*;
    pub use spindle_types::prelude::*;
}
