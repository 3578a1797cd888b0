//! Runtime environments.
//!
//! One [`Scope`] is allocated per dynamic scope entry (program run, call,
//! loop, branch or loop-body iteration) with slot arrays sized from the
//! resolver's [`ScopeShape`]. A slot holds `None` until first assigned.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use spl_ir::{Name, Place, ScopeKind, ScopeShape, SlotClass};

use crate::value::Value;

/// Why a variable access failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// Free name missing from the global map.
    Undefined,
    /// Declared slot read before any assignment.
    Uninitialized,
    /// Address does not fit the environment chain.
    BadAddress,
}

/// Single-threaded shared, mutable handle.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
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

/// The run's name-keyed global map.
pub type Globals = LocalScope<FxHashMap<Name, Value>>;

/// Slot storage of one dynamic scope.
pub struct Scope {
    kind: ScopeKind,
    vars: Vec<Option<Value>>,
    consts: Vec<Option<Value>>,
    parent: Option<Environment>,
}

impl Scope {
    fn new(shape: ScopeShape, parent: Option<Environment>) -> Self {
        Scope {
            kind: shape.kind,
            vars: vec![None; shape.vars as usize],
            consts: vec![None; shape.consts as usize],
            parent,
        }
    }

    fn slots(&self, class: SlotClass) -> &[Option<Value>] {
        match class {
            SlotClass::Var => &self.vars,
            SlotClass::Const => &self.consts,
        }
    }

    fn slots_mut(&mut self, class: SlotClass) -> &mut [Option<Value>] {
        match class {
            SlotClass::Var => &mut self.vars,
            SlotClass::Const => &mut self.consts,
        }
    }
}

/// Handle to a scope plus the global map shared by the whole run.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
    globals: Globals,
}

impl Environment {
    /// Root environment of a run.
    pub fn global(shape: ScopeShape, globals: Globals) -> Self {
        Environment {
            scope: LocalScope::new(Scope::new(shape, None)),
            globals,
        }
    }

    /// Fresh scope of `shape` whose lexical parent is `self`.
    #[must_use]
    pub fn child(&self, shape: ScopeShape) -> Self {
        Environment {
            scope: LocalScope::new(Scope::new(shape, Some(self.clone()))),
            globals: self.globals.clone(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.scope.borrow().kind
    }

    /// The environment `distance` links outward.
    fn ancestor(&self, distance: u32) -> Option<Environment> {
        let mut env = self.clone();
        for _ in 0..distance {
            let parent = env.scope.borrow().parent.clone()?;
            env = parent;
        }
        Some(env)
    }

    /// Read the variable at `place`. `name` is the key for free names.
    pub fn lookup(&self, place: Place, name: Name) -> Result<Value, LookupError> {
        match place {
            Place::Local {
                distance,
                slot,
                class,
            } => {
                let env = self.ancestor(distance).ok_or(LookupError::BadAddress)?;
                let scope = env.scope.borrow();
                match scope.slots(class).get(slot as usize) {
                    Some(Some(value)) => Ok(value.clone()),
                    Some(None) => Err(LookupError::Uninitialized),
                    None => Err(LookupError::BadAddress),
                }
            }
            Place::Global => self
                .globals
                .borrow()
                .get(&name)
                .cloned()
                .ok_or(LookupError::Undefined),
            Place::Unresolved => Err(LookupError::BadAddress),
        }
    }

    /// Write the variable at `place`. Free names are inserted into the
    /// global map.
    pub fn assign(&self, place: Place, name: Name, value: Value) -> Result<(), LookupError> {
        match place {
            Place::Local {
                distance,
                slot,
                class,
            } => {
                let env = self.ancestor(distance).ok_or(LookupError::BadAddress)?;
                let mut scope = env.scope.borrow_mut();
                let cell = scope
                    .slots_mut(class)
                    .get_mut(slot as usize)
                    .ok_or(LookupError::BadAddress)?;
                *cell = Some(value);
                Ok(())
            }
            Place::Global => {
                self.globals.borrow_mut().insert(name, value);
                Ok(())
            }
            Place::Unresolved => Err(LookupError::BadAddress),
        }
    }

    /// Make `value` reachable by name from anywhere in the run.
    pub fn publish_global(&self, name: Name, value: Value) {
        self.globals.borrow_mut().insert(name, value);
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        f.debug_struct("Environment")
            .field("kind", &scope.kind)
            .field("vars", &scope.vars.len())
            .field("consts", &scope.consts.len())
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
