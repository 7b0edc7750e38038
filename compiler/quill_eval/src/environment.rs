//! Lexical scopes.
//!
//! An [`Environment`] is a shared handle to one scope. Scopes form a chain
//! through their parents; lookups and updates walk outward. Function calls
//! and loop iterations create child scopes, closures keep theirs alive, and
//! objects are scopes used as property bags.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use quill_ir::Name;

use crate::Value;

/// Why a scope operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// `define` on a name already bound in the same scope.
    AlreadyDefined,
    /// `set` on a name bound nowhere in the chain.
    Undefined,
}

/// Single-threaded shared cell. Every scope allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings of one scope.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Environment>,
}

/// Shared handle to a scope and, through it, its parents.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A root scope with no parent.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope::default()))
    }

    /// A fresh scope whose parent is `self`.
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in this scope. Fails if this scope already has it;
    /// shadowing a parent's binding is fine.
    pub fn define(&self, name: Name, value: Value) -> Result<(), EnvError> {
        let mut scope = self.0.borrow_mut();
        if scope.bindings.contains_key(&name) {
            return Err(EnvError::AlreadyDefined);
        }
        scope.bindings.insert(name, value);
        Ok(())
    }

    /// Value of the nearest binding of `name`.
    pub fn get(&self, name: Name) -> Option<Value> {
        let mut env = self.clone();
        loop {
            let parent = {
                let scope = env.0.borrow();
                if let Some(value) = scope.bindings.get(&name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            env = parent?;
        }
    }

    pub fn has(&self, name: Name) -> bool {
        self.get(name).is_some()
    }

    /// Whether this scope itself binds `name`.
    pub fn has_local(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Overwrite the nearest binding of `name`.
    pub fn set(&self, name: Name, value: Value) -> Result<(), EnvError> {
        let mut env = self.clone();
        loop {
            let parent = {
                let mut scope = env.0.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(&name) {
                    let old = std::mem::replace(slot, value);
                    drop(scope);
                    drop(old);
                    return Ok(());
                }
                scope.parent.clone()
            };
            env = parent.ok_or(EnvError::Undefined)?;
        }
    }

    /// `set`, or `define` here when no scope has `name`.
    pub fn assign(&self, name: Name, value: Value) {
        let mut env = self.clone();
        loop {
            let parent = {
                let mut scope = env.0.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(&name) {
                    let old = std::mem::replace(slot, value);
                    drop(scope);
                    drop(old);
                    return;
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => break,
            }
        }
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Names bound in this scope, in no particular order.
    pub fn local_names(&self) -> Vec<Name> {
        self.0.borrow().bindings.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every binding of this scope.
    ///
    /// Values are released after the borrow ends, so a binding whose drop
    /// reaches back into this scope does not panic.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.0.borrow_mut().bindings);
        drop(bindings);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may point back at this scope; print only the shape.
        let scope = self.0.borrow();
        f.debug_struct("Environment")
            .field("bindings", &scope.bindings.len())
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
