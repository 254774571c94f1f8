//! Errors raised while resolving provider sets and merging catalogs.

use spindle_types::provider::ProviderSetRef;
use spindle_types::ty::Type;
use spindle_types::unit::{Position, UnitPath};

use crate::catalog::BindingSite;

/// A unit or provider set could not be loaded from the front end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The unit is unknown to the front end.
    #[error("unit \"{0}\" not found")]
    UnitNotFound(UnitPath),

    /// The unit was analysed but declares no set with this name.
    #[error("no such provider set {name} in unit \"{unit}\"")]
    NoSuchSet {
        /// The unit searched.
        unit: UnitPath,
        /// The missing set name.
        name: String,
    },

    /// The front end failed to analyse the unit.
    #[error("analyze unit \"{unit}\": {message}")]
    Analysis {
        /// The unit that failed.
        unit: UnitPath,
        /// The front end's diagnostic.
        message: String,
    },
}

/// Merging provider sets into a catalog failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A referenced provider set could not be loaded.
    #[error("{}", resolution_message(.set, .requested_at, .source))]
    Resolution {
        /// The set that failed to load.
        set: ProviderSetRef,
        /// Position of the import directive requesting the set, or `None`
        /// when the set is one of the roots.
        requested_at: Option<Position>,
        /// Why loading failed.
        source: LoadError,
    },

    /// Two providers bind the same output type.
    #[error("{}", conflict_message(.ty, .site, .previous))]
    Conflict {
        /// The type bound twice.
        ty: Type,
        /// The binding discovered second.
        site: BindingSite,
        /// The binding already in the catalog.
        previous: BindingSite,
    },
}

fn resolution_message(
    set: &ProviderSetRef,
    requested_at: &Option<Position>,
    source: &LoadError,
) -> String {
    match requested_at {
        Some(pos) => format!("{pos}: import provider set {set}: {source}"),
        None => format!("provider set {set}: {source}"),
    }
}

fn conflict_message(ty: &Type, site: &BindingSite, previous: &BindingSite) -> String {
    format!(
        "{}: multiple bindings for {ty} ({}; previous binding at {}, {})",
        site.pos,
        site.describe(),
        previous.pos,
        previous.describe()
    )
}
