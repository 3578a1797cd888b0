//! Static variable addresses and scope shapes written by the resolver.
//!
//! The evaluator sizes every runtime environment from a [`ScopeShape`] and
//! reaches every variable through its [`Place`], so the two phases agree on
//! slot layout by construction.

use std::fmt;

/// Kind of dynamic scope a shape describes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ScopeKind {
    #[default]
    Global,
    Function,
    /// Holds loop variables; lives for the whole loop.
    LoopTitle,
    /// Branch or loop body; reallocated on every entry.
    Sub,
}

/// Slot counts of one dynamic scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ScopeShape {
    pub kind: ScopeKind,
    pub vars: u32,
    pub consts: u32,
}

impl ScopeShape {
    pub const fn new(kind: ScopeKind) -> Self {
        ScopeShape {
            kind,
            vars: 0,
            consts: 0,
        }
    }
}

/// Which slot array of an environment a local lives in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SlotClass {
    Var,
    Const,
}

/// Resolved storage location of a variable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Place {
    /// Not yet visited by the resolver.
    #[default]
    Unresolved,
    /// `distance` environment links outward, then `slot` in the `class` array.
    Local {
        distance: u32,
        slot: u32,
        class: SlotClass,
    },
    /// Free name, looked up by text in the run's global map.
    Global,
}

impl fmt::Debug for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Unresolved => write!(f, "?"),
            Place::Local {
                distance,
                slot,
                class: SlotClass::Var,
            } => write!(f, "({distance}, {slot})"),
            Place::Local {
                distance,
                slot,
                class: SlotClass::Const,
            } => write!(f, "({distance}, const {slot})"),
            Place::Global => write!(f, "global"),
        }
    }
}

/// Whether a variable occurrence introduces a binding or uses one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum RefKind {
    Declare,
    #[default]
    Reference,
}

/// A variable occurrence together with its resolved place.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct VarRef {
    pub kind: RefKind,
    pub place: Place,
}

impl VarRef {
    pub const UNRESOLVED: VarRef = VarRef {
        kind: RefKind::Reference,
        place: Place::Unresolved,
    };

    #[inline]
    pub const fn declare(distance: u32, slot: u32, class: SlotClass) -> Self {
        VarRef {
            kind: RefKind::Declare,
            place: Place::Local {
                distance,
                slot,
                class,
            },
        }
    }

    #[inline]
    pub const fn reference(place: Place) -> Self {
        VarRef {
            kind: RefKind::Reference,
            place,
        }
    }

    #[inline]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self.place, Place::Unresolved)
    }
}

/// How an assignment introduces its target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DeclKind {
    /// `x = v`: reuses a visible binding, otherwise declares a local.
    #[default]
    Plain,
    /// `var x = v` / `let x = v`: always a new local.
    Var,
    /// `const x = v`: new local that cannot be reassigned.
    Const,
}
