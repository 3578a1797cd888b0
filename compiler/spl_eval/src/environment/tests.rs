use super::*;
use spl_ir::StringInterner;

fn globals() -> Globals {
    Globals::new(FxHashMap::default())
}

fn shape(kind: ScopeKind, vars: u32, consts: u32) -> ScopeShape {
    ScopeShape { kind, vars, consts }
}

fn local(distance: u32, slot: u32) -> Place {
    Place::Local {
        distance,
        slot,
        class: SlotClass::Var,
    }
}

#[test]
fn slot_read_write() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let env = Environment::global(shape(ScopeKind::Global, 2, 0), globals());

    assert_eq!(env.lookup(local(0, 1), x), Err(LookupError::Uninitialized));
    assert_eq!(env.assign(local(0, 1), x, Value::Int(7)), Ok(()));
    assert_eq!(env.lookup(local(0, 1), x), Ok(Value::Int(7)));
}

#[test]
fn distance_walks_parent_links() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let root = Environment::global(shape(ScopeKind::Global, 1, 0), globals());
    assert_eq!(root.assign(local(0, 0), x, Value::Int(1)), Ok(()));

    let title = root.child(shape(ScopeKind::LoopTitle, 0, 0));
    let body = title.child(shape(ScopeKind::Sub, 1, 0));
    assert_eq!(body.assign(local(0, 0), x, Value::Int(2)), Ok(()));

    assert_eq!(body.lookup(local(2, 0), x), Ok(Value::Int(1)));
    assert_eq!(body.lookup(local(0, 0), x), Ok(Value::Int(2)));
    assert_eq!(body.lookup(local(3, 0), x), Err(LookupError::BadAddress));
}

#[test]
fn writes_through_a_child_are_shared() {
    let interner = StringInterner::new();
    let n = interner.intern("n");
    let root = Environment::global(shape(ScopeKind::Global, 1, 0), globals());
    let first = root.child(shape(ScopeKind::Function, 0, 0));
    let second = root.child(shape(ScopeKind::Function, 0, 0));

    assert_eq!(first.assign(local(1, 0), n, Value::Int(10)), Ok(()));
    assert_eq!(second.lookup(local(1, 0), n), Ok(Value::Int(10)));
}

#[test]
fn const_slots_are_separate() {
    let interner = StringInterner::new();
    let k = interner.intern("k");
    let env = Environment::global(shape(ScopeKind::Global, 1, 1), globals());
    let konst = Place::Local {
        distance: 0,
        slot: 0,
        class: SlotClass::Const,
    };
    assert_eq!(env.assign(konst, k, Value::Int(3)), Ok(()));
    assert_eq!(env.lookup(konst, k), Ok(Value::Int(3)));
    assert_eq!(env.lookup(local(0, 0), k), Err(LookupError::Uninitialized));
}

#[test]
fn globals_are_keyed_by_name() {
    let interner = StringInterner::new();
    let g = interner.intern("g");
    let env = Environment::global(ScopeShape::default(), globals());
    let inner = env.child(shape(ScopeKind::Sub, 0, 0));

    assert_eq!(inner.lookup(Place::Global, g), Err(LookupError::Undefined));
    env.publish_global(g, Value::Bool(true));
    assert_eq!(inner.lookup(Place::Global, g), Ok(Value::Bool(true)));
}

#[test]
fn child_scopes_are_fresh() {
    let interner = StringInterner::new();
    let v = interner.intern("v");
    let env = Environment::global(ScopeShape::default(), globals());
    let a = env.child(shape(ScopeKind::Sub, 1, 0));
    let b = env.child(shape(ScopeKind::Sub, 1, 0));

    assert_eq!(a.assign(local(0, 0), v, Value::Int(1)), Ok(()));
    assert_eq!(b.lookup(local(0, 0), v), Err(LookupError::Uninitialized));
    assert_eq!(a.clone().lookup(local(0, 0), v), Ok(Value::Int(1)));
    assert_eq!(a.kind(), ScopeKind::Sub);
}
