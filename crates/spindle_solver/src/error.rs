//! Errors raised while solving a call plan.

use spindle_types::ty::Type;
use spindle_types::unit::Position;

use crate::plan::ProviderRef;

/// Solving a plan failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// Two injector parameters have the same type.
    #[error("multiple inputs of the same type {ty}")]
    DuplicateGiven {
        /// The repeated type.
        ty: Type,
    },

    /// An injector parameter has a type some provider in the catalog produces.
    ///
    /// Raised even when the parameter is not needed for the requested output.
    #[error("input of {ty} conflicts with provider {provider} at {pos}")]
    GivenShadowsProvider {
        /// The parameter type.
        ty: Type,
        /// The provider bound to the same type.
        provider: ProviderRef,
        /// Where that provider is declared.
        pos: Position,
    },

    /// A dependency chain revisits a type that is still being resolved.
    #[error("cycle for {ty}: {}", render_path(.path))]
    Cycle {
        /// The type closing the cycle.
        ty: Type,
        /// The cycle, starting and ending at `ty`.
        path: Vec<Type>,
    },

    /// No provider produces a required type.
    #[error("no provider found for {ty} ({})", render_requirement(.required_by))]
    MissingProvider {
        /// The type without a provider.
        ty: Type,
        /// Output type of the provider that needs `ty`; `None` when `ty` is
        /// the injector's result.
        required_by: Option<Type>,
    },
}

impl SolveError {
    /// Returns true for the two given-conflict cases.
    #[must_use]
    pub fn is_given_conflict(&self) -> bool {
        matches!(
            self,
            SolveError::DuplicateGiven { .. } | SolveError::GivenShadowsProvider { .. }
        )
    }
}

fn render_path(path: &[Type]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn render_requirement(required_by: &Option<Type>) -> String {
    match required_by {
        Some(ty) => format!("required by provider of {ty}"),
        None => "output of injector".to_string(),
    }
}
