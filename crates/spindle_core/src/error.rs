//! Errors raised by the generation pipeline.

use spindle_catalog::CatalogError;
use spindle_codegen::EmitError;
use spindle_solver::SolveError;
use spindle_types::unit::{Position, UnitPath};

/// Why a single injector could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectorError {
    /// Merging the injector's provider sets failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No valid plan exists.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// The plan cannot be rendered for the injector's signature.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// The injector is declared in a different unit than the one being
    /// generated.
    #[error("declared in unit \"{declared}\", generating for \"{generating}\"")]
    ForeignUnit {
        /// The injector's unit.
        declared: UnitPath,
        /// The generator's unit.
        generating: UnitPath,
    },
}

/// Generation was aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// An injector failed; nothing is generated for the file.
    #[error("{}", injector_message(.name, .pos, .source))]
    Injector {
        /// The injector function name.
        name: String,
        /// Where the injector is declared, when known.
        pos: Option<Position>,
        /// The underlying failure.
        source: InjectorError,
    },
}

impl GenerateError {
    /// Returns the failing injector's name.
    #[must_use]
    pub fn injector(&self) -> &str {
        match self {
            GenerateError::Injector { name, .. } => name,
        }
    }

    /// Returns the underlying failure.
    #[must_use]
    pub fn cause(&self) -> &InjectorError {
        match self {
            GenerateError::Injector { source, .. } => source,
        }
    }
}

/// Emit errors already start with `inject {name}: `.
fn injector_message(name: &str, pos: &Option<Position>, source: &InjectorError) -> String {
    let body = match source {
        InjectorError::Emit(_) => source.to_string(),
        _ => format!("inject {name}: {source}"),
    };
    match pos {
        Some(pos) => format!("{pos}: {body}"),
        None => body,
    }
}
