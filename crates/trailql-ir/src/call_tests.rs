use trailql_core::{Interner, PathId, TypeHandle};

use crate::{
    ConstantKind, FunctionCallNode, IrArena, IrError, Node, SetModifier, SortDirection,
    TypeModifier,
};

fn ty(interner: &mut Interner, name: &str) -> TypeHandle {
    TypeHandle::new(interner.intern(name))
}

#[test]
fn builder_keeps_args_and_typemods_aligned() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");
    let str_t = ty(&mut interner, "std::str");

    let a = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();
    let b = arena
        .constant(ConstantKind::String, Some("x".into()), Some(str_t))
        .unwrap();

    let call = FunctionCallNode::build("std::contains", int64, TypeModifier::Singleton)
        .arg(a, TypeModifier::Singleton)
        .arg(b, TypeModifier::Optional)
        .finish(&mut arena)
        .unwrap();

    let Node::FunctionCall(f) = arena.node(call) else {
        panic!("expected FunctionCall");
    };
    assert_eq!(f.args.len(), f.params_typemods.len());
    assert_eq!(f.args, vec![a, b]);
    assert_eq!(
        f.params_typemods,
        vec![TypeModifier::Singleton, TypeModifier::Optional]
    );
}

#[test]
fn misaligned_typemods_are_rejected() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let a = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();

    let mut node = FunctionCallNode::build("std::sum", int64, TypeModifier::Singleton)
        .arg(a, TypeModifier::SetOf)
        .into_node();
    node.params_typemods.clear();

    let err = arena.function_call(node).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn empty_variadic_needs_a_variadic_parameter_type() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");
    let str_t = ty(&mut interner, "std::str");

    let err = FunctionCallNode::build("std::concat", str_t, TypeModifier::Singleton)
        .empty_variadic()
        .finish(&mut arena)
        .unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));

    let ok = FunctionCallNode::build("std::concat", str_t, TypeModifier::Singleton)
        .variadic_param_type(int64)
        .empty_variadic()
        .finish(&mut arena)
        .unwrap();
    let Node::FunctionCall(f) = arena.node(ok) else {
        panic!("expected FunctionCall");
    };
    assert!(f.has_empty_variadic);
    assert_eq!(f.variadic_param_type, Some(int64));
}

#[test]
fn partition_is_only_meaningful_for_window_calls() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let key = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();

    let mut node =
        FunctionCallNode::build("std::rank", int64, TypeModifier::Singleton).into_node();
    node.partition.push(key);
    let err = arena.function_call(node).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));

    let ok = FunctionCallNode::build("std::rank", int64, TypeModifier::Singleton)
        .window(vec![key])
        .finish(&mut arena)
        .unwrap();
    let Node::FunctionCall(f) = arena.node(ok) else {
        panic!("expected FunctionCall");
    };
    assert!(f.window);
    assert_eq!(f.partition, vec![key]);
}

#[test]
fn aggregate_call_carries_its_metadata() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");
    let b = ty(&mut interner, "std::bool");
    let user = ty(&mut interner, "default::User");

    let zero = arena
        .constant(ConstantKind::Integer, Some("0".into()), Some(int64))
        .unwrap();
    let input = {
        let set = arena.root_set(PathId::from_type(user), user);
        set.node()
    };
    let sort_key = arena.sort_expr(input, SortDirection::Asc, crate::EmptiesOrder::Last);
    let filter = arena
        .constant(ConstantKind::Boolean, Some("true".into()), Some(b))
        .unwrap();

    let call = FunctionCallNode::build("std::count", int64, TypeModifier::Singleton)
        .sql_function("count")
        .initial_value(zero)
        .arg(input, TypeModifier::SetOf)
        .agg_sort(vec![sort_key])
        .agg_filter(filter)
        .agg_set_modifier(SetModifier::Distinct)
        .finish(&mut arena)
        .unwrap();

    let Node::FunctionCall(f) = arena.node(call) else {
        panic!("expected FunctionCall");
    };
    assert_eq!(f.func_shortname, "std::count");
    assert_eq!(f.func_sql_function.as_deref(), Some("count"));
    assert_eq!(f.func_initial_value, Some(zero));
    assert_eq!(f.agg_sort, vec![sort_key]);
    assert_eq!(f.agg_filter, Some(filter));
    assert_eq!(f.agg_set_modifier, Some(SetModifier::Distinct));
    assert!(!f.func_polymorphic);
}
