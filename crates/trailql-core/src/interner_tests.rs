use crate::Interner;

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("default::User");
    let b = interner.intern("default::User");
    let c = interner.intern("default::Todo");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_roundtrip() {
    let mut interner = Interner::new();

    let sym = interner.intern("owner");
    assert_eq!(interner.resolve(sym), "owner");
}

#[test]
fn get_does_not_intern() {
    let mut interner = Interner::new();

    assert!(interner.get("todo").is_none());
    let sym = interner.intern("todo");
    assert_eq!(interner.get("todo"), Some(sym));
    assert_eq!(interner.len(), 1);
}

#[test]
fn symbol_ordering_is_insertion_order() {
    let mut interner = Interner::new();

    let z = interner.intern("z");
    let a = interner.intern("a");

    // z was interned first, so z < a by insertion order
    assert!(z < a);
}
