//! Injector function emission for Spindle (Layer 3).
//!
//! Turns a solved [`Plan`](spindle_solver::Plan) into the source text of an
//! injector function:
//!
//! ```text
//! func InitApp(cfg pkg0.Config) (*App, error) {
//! 	v0, err := pkg1.Open(cfg)
//! 	if err != nil {
//! 		return nil, err
//! 	}
//! 	v1 := NewApp(v0)
//! 	return v1, nil
//! }
//! ```
//!
//! - [`imports`] - The unit alias table used to qualify cross-unit names
//! - [`zero`] - Zero-value literals for early error returns
//! - [`emit`](mod@emit) - Rendering a plan against an injector signature
//! - [`error`] - Emission failures

/// Emission errors.
pub mod error;

/// Rendering injector functions.
pub mod emit;

/// Unit alias tables.
pub mod imports;

/// Zero values.
pub mod zero;

pub use emit::{check_signature, emit, emit_with};
pub use error::EmitError;
pub use imports::ImportTable;
pub use zero::zero_value;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::emit::{check_signature, emit, emit_with};
    pub use crate::error::EmitError;
    pub use crate::imports::ImportTable;
    pub use crate::zero::zero_value;
}
