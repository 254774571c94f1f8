//! Declaration validation errors.

use crate::provider::ProviderSetRef;
use crate::ty::Type;
use crate::unit::Position;

/// A declaration violates an invariant of the declaration model.
///
/// These are raised while the front end assembles providers and provider
/// sets, before any catalog is merged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclError {
    /// A provider declares two parameters of the same type.
    #[error("{pos}: provider {name} has multiple parameters of type {ty}")]
    DuplicateInput {
        /// The provider function name.
        name: String,
        /// Where the provider is declared.
        pos: Position,
        /// The repeated parameter type.
        ty: Type,
    },

    /// A provider set holds two providers for the same output type.
    #[error(
        "{pos}: provider set {set} has multiple providers for {ty} (previous declaration at {previous})"
    )]
    DuplicateProvider {
        /// The set being built.
        set: ProviderSetRef,
        /// The output type provided twice.
        ty: Type,
        /// Where the rejected provider is declared.
        pos: Position,
        /// Where the first provider is declared.
        previous: Position,
    },
}
