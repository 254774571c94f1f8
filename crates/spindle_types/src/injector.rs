//! Injector signatures.
//!
//! An [`InjectorSpec`] is the fully resolved signature of the function to
//! synthesize: its parameters (the givens), the requested output type, and
//! whether it may return an error alongside the output.

use std::sync::Arc;

use crate::ty::Type;
use crate::unit::{Position, UnitPath};

/// A named injector parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name used in the generated body.
    pub name: Arc<str>,
    /// Parameter type.
    pub ty: Type,
}

/// The function to synthesize.
///
/// # Example
///
/// ```
/// use spindle_types::prelude::*;
///
/// let unit = UnitPath::new("example.com/app");
/// let spec = InjectorSpec::new(unit.clone(), "InitApp", Type::named(unit.clone(), "App", Shape::Struct))
///     .with_param("cfg", Type::named(unit, "Config", Shape::Struct))
///     .fallible();
///
/// assert!(spec.returns_err());
/// assert_eq!(spec.given().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorSpec {
    unit: UnitPath,
    name: Arc<str>,
    pos: Option<Position>,
    params: Vec<Param>,
    output: Type,
    returns_err: bool,
}

impl InjectorSpec {
    /// Creates an infallible injector with no parameters.
    #[must_use]
    pub fn new(unit: UnitPath, name: impl Into<Arc<str>>, output: Type) -> Self {
        Self {
            unit,
            name: name.into(),
            pos: None,
            params: Vec::new(),
            output,
            returns_err: false,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<Arc<str>>, ty: Type) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    /// Declares that the injector returns an error alongside its output.
    #[must_use]
    pub fn fallible(mut self) -> Self {
        self.returns_err = true;
        self
    }

    /// Records where the injector is declared.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Returns the unit the injector is generated into.
    #[must_use]
    pub fn unit(&self) -> &UnitPath {
        &self.unit
    }

    /// Returns the injector function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the injector is declared, if known.
    #[must_use]
    pub fn pos(&self) -> Option<&Position> {
        self.pos.as_ref()
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the requested output type.
    #[must_use]
    pub fn output(&self) -> &Type {
        &self.output
    }

    /// Returns whether the signature can propagate an error.
    #[must_use]
    pub fn returns_err(&self) -> bool {
        self.returns_err
    }

    /// Returns the parameter types, which are the givens of the plan.
    #[must_use]
    pub fn given(&self) -> Vec<Type> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }
}
