//! Solved plans.

use core::fmt;
use std::sync::Arc;

use spindle_types::provider::ProviderDecl;
use spindle_types::ty::Type;
use spindle_types::unit::UnitPath;

/// Identifies a provider function by unit and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderRef {
    /// Unit declaring the function.
    pub unit: UnitPath,
    /// Function name.
    pub name: Arc<str>,
}

impl ProviderRef {
    /// Returns the reference to `provider`'s function.
    #[must_use]
    pub fn of(provider: &ProviderDecl) -> Self {
        Self {
            unit: provider.unit().clone(),
            name: provider.name().into(),
        }
    }
}

impl fmt::Display for ProviderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unit, self.name)
    }
}

/// One scheduled provider invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The provider function to invoke.
    pub provider: ProviderRef,
    /// Argument slots, in the provider's parameter order.
    pub args: Vec<usize>,
    /// The type the call produces.
    pub output: Type,
    /// Whether the call can fail.
    pub may_fail: bool,
}

/// Where a slot's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// The n-th injector parameter.
    Given(usize),
    /// The result of the n-th call.
    Call(usize),
}

/// An ordered list of calls producing a requested type.
///
/// Calls are in dependency order: every argument slot is a given or the
/// result of an earlier call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    given: usize,
    calls: Vec<Call>,
}

impl Plan {
    pub(crate) fn new(given: usize, calls: Vec<Call>) -> Self {
        Self { given, calls }
    }

    /// Returns the number of given slots.
    #[must_use]
    pub fn given_len(&self) -> usize {
        self.given
    }

    /// Returns the calls in execution order.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns true if the requested type is a given and nothing is called.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Maps a slot index to its source.
    #[must_use]
    pub fn source(&self, slot: usize) -> SlotSource {
        if slot < self.given {
            SlotSource::Given(slot)
        } else {
            SlotSource::Call(slot - self.given)
        }
    }

    /// Consumes the plan, returning its calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}
