use trailql_core::{Cardinality, Direction, Interner, PathId, PointerHandle, TypeHandle};

use crate::{ConstantKind, IrArena, IrError, Node, SetOperator, TupleElement, TypeCheckOperator};

fn ty(interner: &mut Interner, name: &str) -> TypeHandle {
    TypeHandle::new(interner.intern(name))
}

fn ptr(interner: &mut Interner, name: &str) -> PointerHandle {
    PointerHandle::new(interner.intern(name))
}

#[test]
fn integer_constant_roundtrips_value_and_type() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let id = arena
        .constant(ConstantKind::Integer, Some("42".into()), Some(int64))
        .unwrap();

    let Node::Constant(c) = arena.node(id) else {
        panic!("expected Constant");
    };
    assert_eq!(c.value, "42");
    assert_eq!(c.stype, int64);
    assert_eq!(arena.node(id).kind(), "IntegerConstant");
}

#[test]
fn string_constant_without_stype_is_a_construction_error() {
    let mut arena = IrArena::new();

    let err = arena
        .constant(ConstantKind::String, Some("hello".into()), None)
        .unwrap_err();

    assert!(matches!(
        err,
        IrError::Construction {
            node: "StringConstant",
            attribute: "stype",
        }
    ));
    insta::assert_snapshot!(
        err.to_string(),
        @"cannot construct StringConstant without stype"
    );
}

#[test]
fn constant_without_value_is_a_construction_error() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let b = ty(&mut interner, "std::bool");

    let err = arena.constant(ConstantKind::Boolean, None, Some(b)).unwrap_err();

    assert!(matches!(
        err,
        IrError::Construction {
            node: "BooleanConstant",
            attribute: "value",
        }
    ));
}

#[test]
fn pointer_is_inbound_follows_direction() {
    let mut interner = Interner::new();
    let user = ty(&mut interner, "default::User");
    let todo_t = ty(&mut interner, "default::Todo");
    let todo = ptr(&mut interner, "todo");

    for (direction, inbound) in [(Direction::Outbound, false), (Direction::Inbound, true)] {
        let mut arena = IrArena::new();
        let user_path = PathId::from_type(user);
        let source = arena.root_set(user_path.clone(), user);
        let target = arena.root_set(user_path.extend(todo, direction), todo_t);

        let p = arena.pointer(source, target, todo, direction, None).unwrap();

        assert_eq!(arena.pointer_node(p).is_inbound(), inbound);
        assert_eq!(arena.set_node(target).rptr, Some(p));
    }
}

#[test]
fn root_set_has_neither_expr_nor_rptr() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");

    let root = arena.root_set(PathId::from_type(user), user);

    let set = arena.set_node(root);
    assert!(set.expr.is_none());
    assert!(set.rptr.is_none());
    assert!(!set.empty);
}

#[test]
fn traversal_cannot_target_a_computed_set() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");
    let int64 = ty(&mut interner, "std::int64");
    let todo = ptr(&mut interner, "todo");

    let one = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();
    let source = arena.root_set(PathId::from_type(user), user);
    let computed = arena.computed_set(PathId::from_type(int64), int64, one);

    let err = arena
        .pointer(source, computed, todo, Direction::Outbound, None)
        .unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn a_set_gets_at_most_one_producing_pointer() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");
    let todo_t = ty(&mut interner, "default::Todo");
    let todo = ptr(&mut interner, "todo");

    let user_path = PathId::from_type(user);
    let source = arena.root_set(user_path.clone(), user);
    let target = arena.root_set(user_path.extend(todo, Direction::Outbound), todo_t);

    arena
        .pointer(source, target, todo, Direction::Outbound, None)
        .unwrap();
    let err = arena
        .pointer(source, target, todo, Direction::Outbound, None)
        .unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn empty_set_reports_its_own_kind() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");

    let empty = arena.empty_set(PathId::from_type(user), user);
    assert_eq!(arena.node(empty.node()).kind(), "EmptySet");
    assert!(arena.set_node(empty).empty);
}

#[test]
fn type_cast_requires_expr_and_type() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let expr = arena
        .constant(ConstantKind::String, Some("42".into()), Some(ty(&mut interner, "std::str")))
        .unwrap();
    let target = arena.type_ref("std::int64", vec![]).unwrap();

    assert!(arena.type_cast(Some(expr), Some(target)).is_ok());

    let err = arena.type_cast(None, Some(target)).unwrap_err();
    assert!(matches!(
        err,
        IrError::Construction {
            node: "TypeCast",
            attribute: "expr",
        }
    ));

    let err = arena.type_cast(Some(expr), None).unwrap_err();
    assert!(matches!(
        err,
        IrError::Construction {
            node: "TypeCast",
            attribute: "type",
        }
    ));

    // The cast target must be a type expression.
    let not_a_type = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();
    let err = arena.type_cast(Some(expr), Some(not_a_type)).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn type_ref_subtypes_must_be_type_refs() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let elem = arena.type_ref("std::int64", vec![]).unwrap();
    assert!(arena.type_ref("array", vec![elem]).is_ok());

    let not_a_type = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();
    let err = arena.type_ref("array", vec![not_a_type]).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn type_check_right_operand_is_a_type_expression_or_array() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");

    let left = arena.root_set(PathId::from_type(user), user);
    let tref = arena.type_ref("default::User", vec![]).unwrap();
    let arr = arena.array(vec![tref]);

    assert!(arena.type_check_op(TypeCheckOperator::Is, left, tref).is_ok());
    assert!(arena.type_check_op(TypeCheckOperator::IsNot, left, arr).is_ok());

    let err = arena
        .type_check_op(TypeCheckOperator::Is, left, left.node())
        .unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn tuple_element_names_must_agree_with_named_flag() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let int64 = ty(&mut interner, "std::int64");

    let one = arena
        .constant(ConstantKind::Integer, Some("1".into()), Some(int64))
        .unwrap();

    assert!(arena
        .tuple(true, vec![TupleElement { name: Some("a".into()), val: one }], None)
        .is_ok());
    assert!(arena
        .tuple(false, vec![TupleElement { name: None, val: one }], None)
        .is_ok());

    let err = arena
        .tuple(true, vec![TupleElement { name: None, val: one }], None)
        .unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn set_op_merges_cardinality_through_the_lattice() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");

    let left = arena.root_set(PathId::from_type(user), user);
    let right = arena.root_set(PathId::from_type(user), user);

    let both_one = arena.set_op(
        SetOperator::Union,
        left,
        right,
        Cardinality::One,
        Cardinality::One,
        false,
    );
    let Node::SetOp(op) = arena.node(both_one) else {
        panic!("expected SetOp");
    };
    assert_eq!(op.merged_cardinality(), Cardinality::One);
    assert!(!op.exclusive);

    let mixed = arena.set_op(
        SetOperator::Union,
        left,
        right,
        Cardinality::One,
        Cardinality::Many,
        true,
    );
    let Node::SetOp(op) = arena.node(mixed) else {
        panic!("expected SetOp");
    };
    assert_eq!(op.merged_cardinality(), Cardinality::Many);
    assert!(op.exclusive);
}

#[test]
fn if_else_tracks_branch_cardinalities_independently() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");
    let b = ty(&mut interner, "std::bool");

    let cond_val = arena
        .constant(ConstantKind::Boolean, Some("true".into()), Some(b))
        .unwrap();
    let condition = arena.computed_set(PathId::from_type(b), b, cond_val);
    let if_expr = arena.root_set(PathId::from_type(user), user);
    let else_expr = arena.root_set(PathId::from_type(user), user);

    let node = arena.if_else(
        condition,
        if_expr,
        else_expr,
        Cardinality::One,
        Cardinality::AtMostOne,
    );
    let Node::IfElse(n) = arena.node(node) else {
        panic!("expected IfElse");
    };
    assert_eq!(n.if_expr_card, Cardinality::One);
    assert_eq!(n.else_expr_card, Cardinality::AtMostOne);
    assert_eq!(n.merged_cardinality(), Cardinality::AtMostOne);
}

#[test]
fn coalesce_with_many_fallback_is_many() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");

    // Left side claims ONE, but coalesce only ever credits it with
    // AT_MOST_ONE: the fallback still dominates the merge.
    let left = arena.root_set(PathId::from_type(user), user);
    let right = arena.root_set(PathId::from_type(user), user);

    let node = arena.coalesce(left, right, Cardinality::Many);
    let Node::Coalesce(n) = arena.node(node) else {
        panic!("expected Coalesce");
    };
    assert_eq!(n.merged_cardinality(), Cardinality::Many);
}

#[test]
fn shape_is_write_once() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let user = ty(&mut interner, "default::User");
    let todo_t = ty(&mut interner, "default::Todo");
    let todo = ptr(&mut interner, "todo");

    let user_path = PathId::from_type(user);
    let root = arena.root_set(user_path.clone(), user);
    let child = arena.root_set(user_path.extend(todo, Direction::Outbound), todo_t);

    arena.set_shape(root, vec![child]).unwrap();
    let err = arena.set_shape(root, vec![child]).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
}

#[test]
fn path_scope_assignment_is_write_once() {
    let mut interner = Interner::new();
    let mut arena = IrArena::new();
    let mut tree = trailql_core::ScopeTree::new();
    let user = ty(&mut interner, "default::User");

    let set = arena.root_set(PathId::from_type(user), user);
    let region = tree.new_child(tree.root(), false).unwrap();

    arena.set_path_scope(set, region).unwrap();
    let err = arena.set_path_scope(set, tree.root()).unwrap_err();
    assert!(matches!(err, IrError::Inconsistent(_)));
    assert_eq!(arena.set_node(set).path_scope_id, Some(region));
}
