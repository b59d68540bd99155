//! RAII guards for the evaluator's scope stack.
//!
//! A guard holds `&mut Evaluator` and implements `Deref`/`DerefMut`, so the
//! walk continues through it. Dropping the guard pops what it pushed, on
//! every exit path: normal completion, an early `?` return, or unwinding.

use std::ops::{Deref, DerefMut};

use super::Evaluator;
use crate::environment::{Frame, LocalScope};

/// Pops one block frame on drop.
pub(crate) struct ScopedEvaluator<'guard, 'a> {
    evaluator: &'guard mut Evaluator<'a>,
}

impl Drop for ScopedEvaluator<'_, '_> {
    fn drop(&mut self) {
        self.evaluator.env.pop_scope();
    }
}

impl<'a> Deref for ScopedEvaluator<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for ScopedEvaluator<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

/// Leaves a function body on drop, restoring the caller's frames.
pub(crate) struct CallScope<'guard, 'a> {
    evaluator: &'guard mut Evaluator<'a>,
}

impl Drop for CallScope<'_, '_> {
    fn drop(&mut self) {
        self.evaluator.env.exit_call();
    }
}

impl<'a> Deref for CallScope<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for CallScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<'a> Evaluator<'a> {
    /// Open a block frame, closed when the guard drops.
    pub(crate) fn scoped(&mut self) -> ScopedEvaluator<'_, 'a> {
        self.env.push_scope();
        ScopedEvaluator { evaluator: self }
    }

    /// Enter a function body against the frames captured at its definition.
    pub(crate) fn call_scope(&mut self, scope: &[LocalScope<Frame>]) -> CallScope<'_, 'a> {
        self.env.enter_call(scope);
        CallScope { evaluator: self }
    }
}
