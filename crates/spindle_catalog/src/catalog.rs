//! The merged provider catalog.
//!
//! [`merge`] performs a breadth-first closure over the import edges of a list
//! of root provider sets and flattens every provider it meets into one
//! [`ProviderCatalog`]: a mapping from output type to the single provider
//! that produces it.
//!
//! # Rules
//!
//! - Each set is fetched and processed at most once, so import cycles and
//!   diamonds are harmless.
//! - A second provider for an already-bound type is a hard error
//!   ([`CatalogError::Conflict`]), never an override.
//! - Only provider bindings are checked; the shape of the import graph is not.

use core::fmt;
use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashSet;
use indexmap::IndexMap;
use spindle_types::provider::{ProviderDecl, ProviderSetRef};
use spindle_types::ty::Type;
use spindle_types::unit::Position;

use crate::error::CatalogError;
use crate::source::ProviderSetSource;

// ─────────────────────────────────────────────────────────────────────────────
// Bindings
// ─────────────────────────────────────────────────────────────────────────────

/// How the set holding a binding was reached during the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOrigin {
    /// The set is one of the roots requested by the injector.
    Injector,
    /// The set was reached through an import directive of set `by`.
    Import {
        /// The importing set.
        by: ProviderSetRef,
    },
}

impl fmt::Display for BindingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingOrigin::Injector => f.write_str("added by injector"),
            BindingOrigin::Import { by } => write!(f, "imported by {by}"),
        }
    }
}

/// Where a binding came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSite {
    /// Declaration site of the provider.
    pub pos: Position,
    /// The set declaring the provider.
    pub set: ProviderSetRef,
    /// How that set was reached.
    pub origin: BindingOrigin,
}

impl BindingSite {
    /// Describes the set and origin, e.g. `provider set "a".Module, added by injector`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("provider set {}, {}", self.set, self.origin)
    }
}

/// A provider bound in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    provider: Arc<ProviderDecl>,
    set: ProviderSetRef,
    origin: BindingOrigin,
}

impl Binding {
    /// Returns the bound provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<ProviderDecl> {
        &self.provider
    }

    /// Returns the set declaring the provider.
    #[must_use]
    pub fn set(&self) -> &ProviderSetRef {
        &self.set
    }

    /// Returns how the declaring set was reached.
    #[must_use]
    pub fn origin(&self) -> &BindingOrigin {
        &self.origin
    }

    /// Returns the full diagnostic site of this binding.
    #[must_use]
    pub fn site(&self) -> BindingSite {
        BindingSite {
            pos: self.provider.pos().clone(),
            set: self.set.clone(),
            origin: self.origin.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProviderCatalog
// ─────────────────────────────────────────────────────────────────────────────

/// Flat, conflict-free table from output type to provider.
///
/// Immutable once merged; one catalog can serve any number of injectors that
/// request the same roots. Bindings iterate in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCatalog {
    bindings: IndexMap<Type, Binding>,
}

impl ProviderCatalog {
    /// Returns the provider bound to `ty`.
    #[must_use]
    pub fn get(&self, ty: &Type) -> Option<&Arc<ProviderDecl>> {
        self.bindings.get(ty).map(Binding::provider)
    }

    /// Returns the full binding for `ty`.
    #[must_use]
    pub fn binding(&self, ty: &Type) -> Option<&Binding> {
        self.bindings.get(ty)
    }

    /// Returns true if some provider produces `ty`.
    #[must_use]
    pub fn contains(&self, ty: &Type) -> bool {
        self.bindings.contains_key(ty)
    }

    /// Returns the number of bound types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over bindings in merge order.
    pub fn iter(&self) -> impl Iterator<Item = (&Type, &Binding)> {
        self.bindings.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Merge
// ─────────────────────────────────────────────────────────────────────────────

/// A set waiting to be visited.
struct Pending {
    set: ProviderSetRef,
    /// The importing set; `None` for roots.
    from: Option<ProviderSetRef>,
    /// Position of the import directive; `None` for roots.
    pos: Option<Position>,
}

/// Merges the transitive import closure of `roots` into one catalog.
///
/// # Errors
///
/// - [`CatalogError::Resolution`] if a set cannot be loaded; for imported
///   sets the error carries the position of the import directive.
/// - [`CatalogError::Conflict`] if two providers bind the same type.
///
/// # Example
///
/// ```ignore
/// let cache = ProviderSetCache::new(front_end);
/// let catalog = merge(&cache, &[ProviderSetRef::module(unit)])?;
/// ```
pub fn merge<S>(source: &S, roots: &[ProviderSetRef]) -> Result<ProviderCatalog, CatalogError>
where
    S: ProviderSetSource + ?Sized,
{
    let _span = tracing::debug_span!("merge", roots = roots.len()).entered();

    let mut catalog = ProviderCatalog::default();
    let mut visited: HashSet<ProviderSetRef> = HashSet::new();
    let mut queue: VecDeque<Pending> = roots
        .iter()
        .map(|set| Pending {
            set: set.clone(),
            from: None,
            pos: None,
        })
        .collect();

    while let Some(next) = queue.pop_front() {
        if visited.contains(&next.set) {
            continue;
        }
        visited.insert(next.set.clone());

        let set = source
            .provider_set(&next.set)
            .map_err(|source| CatalogError::Resolution {
                set: next.set.clone(),
                requested_at: next.pos.clone(),
                source,
            })?;

        let origin = match next.from {
            None => BindingOrigin::Injector,
            Some(by) => BindingOrigin::Import { by },
        };
        tracing::trace!(
            set = %next.set,
            providers = set.providers().len(),
            imports = set.imports().len(),
            %origin,
            "visiting provider set"
        );

        for provider in set.providers() {
            let binding = Binding {
                provider: Arc::clone(provider),
                set: next.set.clone(),
                origin: origin.clone(),
            };
            if let Some(previous) = catalog.bindings.get(provider.output()) {
                return Err(CatalogError::Conflict {
                    ty: provider.output().clone(),
                    site: binding.site(),
                    previous: previous.site(),
                });
            }
            catalog.bindings.insert(provider.output().clone(), binding);
        }

        for import in set.imports() {
            queue.push_back(Pending {
                set: import.set.clone(),
                from: Some(next.set.clone()),
                pos: Some(import.pos.clone()),
            });
        }
    }

    tracing::debug!(
        sets = visited.len(),
        bindings = catalog.len(),
        "merged provider catalog"
    );
    Ok(catalog)
}
