//! Errors raised while emitting an injector.

use spindle_types::ty::Type;
use spindle_types::unit::UnitPath;

/// Emitting an injector failed.
///
/// Every message starts with `inject {name}: ` so it reads on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// A fallible provider is needed by an injector that cannot return an
    /// error.
    #[error("inject {injector}: provider for {ty} returns error but injection not allowed to fail")]
    Signature {
        /// The injector function name.
        injector: String,
        /// Output type of the fallible provider.
        ty: Type,
    },

    /// The plan was not solved for this injector's signature.
    #[error("inject {injector}: plan does not match signature: {detail}")]
    PlanMismatch {
        /// The injector function name.
        injector: String,
        /// What disagrees.
        detail: String,
    },

    /// The import table has no alias for a unit the injector references.
    #[error("inject {injector}: no import alias for unit \"{unit}\"")]
    MissingImport {
        /// The injector function name.
        injector: String,
        /// The unit without an alias.
        unit: UnitPath,
    },
}

impl EmitError {
    /// Returns the name of the injector that failed to emit.
    #[must_use]
    pub fn injector(&self) -> &str {
        match self {
            EmitError::Signature { injector, .. }
            | EmitError::PlanMismatch { injector, .. }
            | EmitError::MissingImport { injector, .. } => injector,
        }
    }
}
