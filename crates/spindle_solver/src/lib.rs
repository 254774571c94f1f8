//! Call-plan solving for Spindle (Layer 2).
//!
//! Given a merged [`ProviderCatalog`](spindle_catalog::ProviderCatalog), the
//! types available as injector parameters (the givens) and a requested
//! output type, [`solve`] computes the minimal ordered list of provider
//! invocations that produces the output.
//!
//! - [`plan`] - [`Plan`], [`Call`] and slot addressing
//! - [`solve`](mod@solve) - The depth-first, cycle-aware resolver
//! - [`error`] - Given conflicts, cycles and missing providers
//!
//! # Slots
//!
//! Every value in a plan lives in a numbered slot. Slots `0..given` are the
//! injector parameters in declaration order; slot `given + k` is the result
//! of the `k`-th call. A call's arguments only ever name slots that exist by
//! the time the call runs.

/// Solver errors.
pub mod error;

/// Solved plans.
pub mod plan;

/// The resolver.
pub mod solve;

pub use error::SolveError;
pub use plan::{Call, Plan, ProviderRef, SlotSource};
pub use solve::solve;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::SolveError;
    pub use crate::plan::{Call, Plan, ProviderRef, SlotSource};
    pub use crate::solve::solve;
}
