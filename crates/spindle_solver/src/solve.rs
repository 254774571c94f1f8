//! The resolver.
//!
//! Resolution is a depth-first post-order walk from the requested type
//! through provider inputs. Instead of recursing, the walk keeps an explicit
//! stack of frames (type being resolved, its provider, and the index of the
//! next input to visit), so deep dependency chains cannot exhaust the call
//! stack. The frames on the stack double as the trail used for cycle
//! detection.
//!
//! Each type is resolved at most once; later requests reuse its slot.

use std::sync::Arc;

use hashbrown::HashMap;
use spindle_catalog::ProviderCatalog;
use spindle_types::provider::ProviderDecl;
use spindle_types::ty::Type;

use crate::error::SolveError;
use crate::plan::{Call, Plan, ProviderRef};

/// Computes the calls needed to produce `want` from `given`.
///
/// `given` are the injector parameter types in declaration order; they
/// occupy slots `0..given.len()`.
///
/// # Errors
///
/// - [`SolveError::DuplicateGiven`] if two givens have the same type.
/// - [`SolveError::GivenShadowsProvider`] if a given's type has a provider in
///   `catalog`, whether or not that type is needed.
/// - [`SolveError::Cycle`] if a type depends on itself.
/// - [`SolveError::MissingProvider`] if a needed type is neither given nor
///   provided.
pub fn solve(catalog: &ProviderCatalog, given: &[Type], want: &Type) -> Result<Plan, SolveError> {
    let _span = tracing::debug_span!("solve", want = %want, given = given.len()).entered();

    for (i, ty) in given.iter().enumerate() {
        if given[..i].contains(ty) {
            return Err(SolveError::DuplicateGiven { ty: ty.clone() });
        }
    }

    let mut resolved: HashMap<Type, usize> = HashMap::with_capacity(given.len());
    for (slot, ty) in given.iter().enumerate() {
        if let Some(provider) = catalog.get(ty) {
            return Err(SolveError::GivenShadowsProvider {
                ty: ty.clone(),
                provider: ProviderRef::of(provider),
                pos: provider.pos().clone(),
            });
        }
        resolved.insert(ty.clone(), slot);
    }

    let mut solver = Solver {
        catalog,
        given: given.len(),
        resolved,
        calls: Vec::new(),
        stack: Vec::new(),
    };
    solver.resolve(want)?;

    tracing::debug!(calls = solver.calls.len(), "solved call plan");
    Ok(Plan::new(given.len(), solver.calls))
}

/// A type whose provider inputs are being resolved.
struct Frame<'c> {
    ty: Type,
    provider: &'c Arc<ProviderDecl>,
    /// Index of the next provider input to visit.
    next: usize,
}

struct Solver<'c> {
    catalog: &'c ProviderCatalog,
    given: usize,
    /// Slot of every type resolved so far, givens included.
    resolved: HashMap<Type, usize>,
    calls: Vec<Call>,
    stack: Vec<Frame<'c>>,
}

impl<'c> Solver<'c> {
    fn resolve(&mut self, want: &Type) -> Result<(), SolveError> {
        if self.resolved.contains_key(want) {
            return Ok(());
        }
        self.enter(want.clone(), None)?;

        while let Some(frame) = self.stack.last_mut() {
            let provider = frame.provider;
            let Some(dep) = provider.inputs().get(frame.next) else {
                self.schedule();
                continue;
            };
            frame.next += 1;

            if self.resolved.contains_key(dep) {
                continue;
            }
            if let Some(start) = self.stack.iter().position(|f| f.ty == *dep) {
                let mut path: Vec<Type> = self.stack[start..].iter().map(|f| f.ty.clone()).collect();
                path.push(dep.clone());
                return Err(SolveError::Cycle {
                    ty: dep.clone(),
                    path,
                });
            }

            let parent = provider.output().clone();
            self.enter(dep.clone(), Some(parent))?;
        }
        Ok(())
    }

    /// Pushes a frame for `ty`, failing if nothing provides it.
    fn enter(&mut self, ty: Type, required_by: Option<Type>) -> Result<(), SolveError> {
        let Some(provider) = self.catalog.get(&ty) else {
            return Err(SolveError::MissingProvider { ty, required_by });
        };
        self.stack.push(Frame {
            ty,
            provider,
            next: 0,
        });
        Ok(())
    }

    /// Pops the finished top frame and appends its call.
    fn schedule(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let args = frame
            .provider
            .inputs()
            .iter()
            .map(|input| self.resolved[input])
            .collect();
        let slot = self.given + self.calls.len();
        tracing::trace!(ty = %frame.ty, provider = frame.provider.name(), slot, "scheduled call");

        self.resolved.insert(frame.ty.clone(), slot);
        self.calls.push(Call {
            provider: ProviderRef::of(frame.provider),
            args,
            output: frame.ty,
            may_fail: frame.provider.may_fail(),
        });
    }
}
