//! Scope manager: variable frames and the function table.
//!
//! A frame is an insertion-ordered list of declarations with a hash index on
//! the identifier. Frames are shared handles: a function definition captures
//! the chain of frames visible where it appears, and a call runs against that
//! chain, so a frame outlives its block while a function still refers to it.
//! Functions live in one global table keyed by name and arity.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::ptr;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tala_ir::{FunctionDef, NodeKind, Span, Type, Value};
use tracing::trace;

use crate::errors::{ambiguous_overload, duplicate_declaration, duplicate_function, EvalResult};

/// A declared variable or parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub ty: Type,
    pub value: Value,
    /// Value before anything is assigned.
    pub default: Value,
    pub span: Span,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: Type, span: Span) -> Self {
        let default = ty.default_value();
        Declaration {
            name: name.into(),
            ty,
            value: default.clone(),
            default,
            span,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }
}

/// One lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    declarations: Vec<Declaration>,
    index: FxHashMap<String, usize>,
}

impl Frame {
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Declaration> {
        self.index.get(name).map(|&i| &mut self.declarations[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Insert unless the name is taken; gives the declaration back if it is.
    fn insert(&mut self, decl: Declaration) -> Result<(), Declaration> {
        if self.contains(&decl.name) {
            return Err(decl);
        }
        self.index.insert(decl.name.clone(), self.declarations.len());
        self.declarations.push(decl);
        Ok(())
    }

    /// Declarations in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Shared handle to a frame.
///
/// Cloning the handle shares the frame; writes through one handle are seen
/// through every other.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0.borrow()).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Frames visible at one point of the program, outermost first.
pub type ScopeChain = Vec<LocalScope<Frame>>;

/// A registered function.
#[derive(Clone, Debug)]
pub struct FunctionSignature<'a> {
    pub return_ty: Type,
    pub param_types: SmallVec<[Type; 4]>,
    pub def: &'a FunctionDef,
    /// Span of the definition statement.
    pub span: Span,
    /// Frames visible where the function was defined.
    pub scope: ScopeChain,
}

impl<'a> FunctionSignature<'a> {
    pub fn new(def: &'a FunctionDef, span: Span, scope: ScopeChain) -> Self {
        let param_types = def
            .params
            .iter()
            .map(|p| match &p.kind {
                NodeKind::ParamDecl { ty, .. } => *ty,
                _ => Type::Unresolved,
            })
            .collect();
        FunctionSignature {
            return_ty: def.return_ty,
            param_types,
            def,
            span,
            scope,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.def.name
    }

    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    fn same_types(&self, other: &FunctionSignature<'_>) -> bool {
        self.return_ty == other.return_ty && self.param_types == other.param_types
    }
}

/// Scope stack plus function table.
#[derive(Debug)]
pub struct Environment<'a> {
    /// Innermost frame last. The root frame is never popped.
    frames: ScopeChain,
    /// Caller stacks set aside while a function body runs.
    calls: Vec<ScopeChain>,
    functions: FxHashMap<&'a str, SmallVec<[FunctionSignature<'a>; 2]>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Environment {
            frames: vec![LocalScope::default()],
            calls: Vec::new(),
            functions: FxHashMap::default(),
        }
    }

    /// Number of visible frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Handles to every visible frame, for a function defined here.
    pub fn capture(&self) -> ScopeChain {
        self.frames.clone()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.frames.push(LocalScope::default());
        trace!(depth = self.frames.len(), "push scope");
    }

    #[inline]
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        trace!(depth = self.frames.len(), "pop scope");
    }

    /// Declare in the innermost frame.
    ///
    /// Names in enclosing frames are shadowed, not conflicting.
    pub fn declare(&mut self, decl: Declaration) -> EvalResult<()> {
        let frame = self.innermost();
        let inserted = frame.borrow_mut().insert(decl);
        inserted.map_err(|decl| duplicate_declaration(&decl.name, decl.span))
    }

    /// The frame new declarations go into, opened first if none is visible.
    fn innermost(&mut self) -> &LocalScope<Frame> {
        if self.frames.is_empty() {
            self.frames.push(LocalScope::default());
        }
        &self.frames[self.frames.len() - 1]
    }

    /// Innermost visible frame declaring `name`.
    fn frame_of(&self, name: &str) -> Option<&LocalScope<Frame>> {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.borrow().contains(name))
    }

    /// Run `f` on the innermost visible declaration of `name`.
    fn find<R>(&self, name: &str, f: impl FnOnce(&Declaration) -> R) -> Option<R> {
        let frame = self.frame_of(name)?.borrow();
        frame.get(name).map(f)
    }

    /// Innermost visible declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<Declaration> {
        self.find(name, Declaration::clone)
    }

    pub fn lookup_type(&self, name: &str) -> Option<Type> {
        self.find(name, |decl| decl.ty)
    }

    pub fn lookup_value(&self, name: &str) -> Option<Value> {
        self.find(name, |decl| decl.value.clone())
    }

    /// Store a new current value. Returns `false` if `name` is not visible.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let Some(frame) = self.frame_of(name) else {
            return false;
        };
        match frame.borrow_mut().get_mut(name) {
            Some(decl) => {
                decl.value = value;
                true
            }
            None => false,
        }
    }

    /// Register a function.
    ///
    /// Registering the same definition again (a loop or function body walked
    /// a second time) only refreshes its captured frames.
    pub fn declare_function(&mut self, sig: FunctionSignature<'a>) -> EvalResult<()> {
        let overloads = self.functions.entry(sig.name()).or_default();
        if let Some(existing) = overloads.iter_mut().find(|f| f.arity() == sig.arity()) {
            if ptr::eq(existing.def, sig.def) {
                existing.scope = sig.scope;
                return Ok(());
            }
            return Err(if existing.same_types(&sig) {
                duplicate_function(sig.name(), sig.arity(), sig.span)
            } else {
                ambiguous_overload(sig.name(), sig.arity(), sig.span)
            });
        }
        trace!(name = sig.name(), arity = sig.arity(), "declare function");
        overloads.push(sig);
        Ok(())
    }

    pub fn resolve_function(&self, name: &str, arity: usize) -> Option<&FunctionSignature<'a>> {
        self.functions
            .get(name)?
            .iter()
            .find(|f| f.arity() == arity)
    }

    /// Enter a function body: set the caller's frames aside, make the
    /// definition's frames visible and push the call frame.
    pub fn enter_call(&mut self, scope: &[LocalScope<Frame>]) {
        let caller = std::mem::replace(&mut self.frames, scope.to_vec());
        self.calls.push(caller);
        self.push_scope();
    }

    /// Leave a function body, restoring the caller's frames.
    pub fn exit_call(&mut self) {
        if let Some(caller) = self.calls.pop() {
            self.frames = caller;
        }
    }
}

impl Default for Environment<'_> {
    fn default() -> Self {
        Self::new()
    }
}
