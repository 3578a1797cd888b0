//! Compile-time mirror of the runtime environment chain.

use rustc_hash::FxHashMap;
use spl_ir::{Name, Place, ScopeKind, ScopeShape, SlotClass, VarRef};

/// One static scope: the names it declares and the slots handed out so far.
struct Context {
    shape: ScopeShape,
    names: FxHashMap<Name, (SlotClass, u32)>,
}

/// Stack of open contexts, innermost last.
///
/// The bottom entry is always the global context. `loops` keeps one loop
/// nesting counter per function body so `break` cannot escape a call.
pub(crate) struct ContextStack {
    contexts: Vec<Context>,
    loops: Vec<u32>,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        let mut stack = ContextStack {
            contexts: Vec::new(),
            loops: Vec::new(),
        };
        stack.push(ScopeKind::Global);
        stack
    }

    pub(crate) fn push(&mut self, kind: ScopeKind) {
        if matches!(kind, ScopeKind::Global | ScopeKind::Function) {
            self.loops.push(0);
        }
        self.contexts.push(Context {
            shape: ScopeShape::new(kind),
            names: FxHashMap::default(),
        });
    }

    /// Close the innermost context and return its final shape.
    pub(crate) fn pop(&mut self) -> ScopeShape {
        let Some(context) = self.contexts.pop() else {
            return ScopeShape::default();
        };
        if matches!(context.shape.kind, ScopeKind::Global | ScopeKind::Function) {
            self.loops.pop();
        }
        context.shape
    }

    /// Allocate the next slot of `class` in the innermost context.
    ///
    /// Redeclaring a name shadows the earlier slot for the rest of the scope.
    pub(crate) fn declare(&mut self, name: Name, class: SlotClass) -> VarRef {
        let Some(context) = self.contexts.last_mut() else {
            return VarRef::reference(Place::Global);
        };
        let counter = match class {
            SlotClass::Var => &mut context.shape.vars,
            SlotClass::Const => &mut context.shape.consts,
        };
        let slot = *counter;
        *counter += 1;
        context.names.insert(name, (class, slot));
        VarRef::declare(0, slot, class)
    }

    /// Place of the nearest visible declaration of `name`.
    pub(crate) fn lookup(&self, name: Name) -> Place {
        self.contexts
            .iter()
            .rev()
            .zip(0u32..)
            .find_map(|(context, distance)| {
                context
                    .names
                    .get(&name)
                    .map(|&(class, slot)| Place::Local {
                        distance,
                        slot,
                        class,
                    })
            })
            .unwrap_or(Place::Global)
    }

    pub(crate) fn enter_loop(&mut self) {
        if let Some(depth) = self.loops.last_mut() {
            *depth += 1;
        }
    }

    pub(crate) fn exit_loop(&mut self) {
        if let Some(depth) = self.loops.last_mut() {
            *depth = depth.saturating_sub(1);
        }
    }

    pub(crate) fn in_loop(&self) -> bool {
        self.loops.last().is_some_and(|&depth| depth > 0)
    }
}
