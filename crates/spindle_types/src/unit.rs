//! Compilation unit identity and source positions.
//!
//! A [`UnitPath`] names one compilation unit (the import path of a package in
//! the host language). A [`Position`] is the provenance token attached to
//! declarations and import directives so diagnostics can point back at the
//! source that caused them.

use core::fmt;
use std::sync::Arc;

/// Identity of a compilation unit.
///
/// Cheap to clone; compared and ordered by the path string. Ordering is used
/// to assign import aliases deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitPath(Arc<str>);

impl UnitPath {
    /// Creates a unit path.
    #[must_use]
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    /// The scope of predeclared names (`error`, `any`, `comparable`).
    ///
    /// Names in the universe are visible everywhere: they are never qualified
    /// and never imported.
    #[must_use]
    pub fn universe() -> Self {
        Self::new("")
    }

    /// Returns true for the universe scope.
    #[must_use]
    pub fn is_universe(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A resolved source position.
///
/// Displays as `file:line:column`, the form diagnostics are prefixed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    file: Arc<str>,
    line: u32,
    column: u32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Returns the file name.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the 1-based line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
