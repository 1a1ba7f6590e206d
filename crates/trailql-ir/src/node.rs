//! The expression node algebra.
//!
//! One variant per concrete node; consumers (scope resolution,
//! cardinality inference, the relational backend) match exhaustively
//! over [`Node`] so adding a variant is a compile-time event for every
//! consumer.
//!
//! Constructors on [`IrArena`] enforce local invariants eagerly: a
//! constant may never exist without its value and type, a cast may never
//! exist without its target type expression. Everything else about a
//! node is fixed at construction; corrections build replacement nodes.

use serde::{Deserialize, Serialize};
use trailql_core::{Cardinality, Direction, PathId, PointerHandle, RegionId, TypeHandle};

use crate::arena::{IrArena, NodeId, SetId};
use crate::call::FunctionCallNode;
use crate::stmt::{
    DeleteStmtNode, GroupStmtNode, InsertStmtNode, SelectStmtNode, StmtCore, UpdateStmtNode,
};
use crate::{IrError, Result};

/// Set-combining operators (`UNION` and friends).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// Scalar binary operators.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BinOperator {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    In,
    NotIn,
    Like,
    ILike,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Neg,
    Pos,
}

/// Equivalence operators treat two empty operands as equivalent, unlike
/// plain equality which propagates emptiness.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EquivalenceOperator {
    Equivalent,
    NotEquivalent,
}

/// Type-check operators (`IS` / `IS NOT`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeCheckOperator {
    Is,
    IsNot,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ordering of absent values in a sort.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EmptiesOrder {
    First,
    Last,
}

/// Tag distinguishing the constant node family.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConstantKind {
    String,
    RawString,
    Integer,
    Float,
    Boolean,
    Bytes,
}

impl ConstantKind {
    fn node_name(self) -> &'static str {
        match self {
            Self::String => "StringConstant",
            Self::RawString => "RawStringConstant",
            Self::Integer => "IntegerConstant",
            Self::Float => "FloatConstant",
            Self::Boolean => "BooleanConstant",
            Self::Bytes => "BytesConstant",
        }
    }
}

/// The workhorse node: a typed result set at a given path.
///
/// A non-root set is defined by exactly one of `expr` (a computed set)
/// or `rptr` (produced by pointer traversal); a root set has neither.
/// `rptr` is attached by [`IrArena::pointer`], never set directly.
#[derive(Debug, Clone)]
pub struct SetNode {
    pub path_id: PathId,
    pub stype: TypeHandle,
    /// Scope-tree region this set is attached to. Assigned by the
    /// scoping pass, write-once.
    pub path_scope_id: Option<RegionId>,
    pub expr: Option<NodeId>,
    pub rptr: Option<NodeId>,
    /// Set this one was derived from by view expansion.
    pub view_source: Option<SetId>,
    /// Label used to re-display the set in diagnostics.
    pub anchor: Option<String>,
    /// Sub-paths selected for structured output. Filled once by
    /// [`IrArena::set_shape`] when the projection is known.
    pub shape: Vec<SetId>,
    /// Statically known to be the empty set of `stype`.
    pub empty: bool,
}

impl SetNode {
    fn new(path_id: PathId, stype: TypeHandle) -> Self {
        Self {
            path_id,
            stype,
            path_scope_id: None,
            expr: None,
            rptr: None,
            view_source: None,
            anchor: None,
            shape: Vec::new(),
            empty: false,
        }
    }
}

/// One edge traversal: a schema pointer applied to a source set.
#[derive(Debug, Clone)]
pub struct PointerNode {
    pub source: SetId,
    pub target: SetId,
    pub ptrcls: PointerHandle,
    pub direction: Direction,
    pub anchor: Option<String>,
}

impl PointerNode {
    /// Derived from `direction`; the two can never disagree.
    pub fn is_inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }
}

/// Type expression used by casts and type checks: a main type plus
/// recursively-typed subtypes for collection/polymorphic types.
#[derive(Debug, Clone)]
pub struct TypeRefNode {
    pub maintype: String,
    pub subtypes: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ParameterNode {
    pub name: String,
    pub stype: TypeHandle,
}

/// A literal. Never exists in a "not yet typed" state.
#[derive(Debug, Clone)]
pub struct ConstantNode {
    pub kind: ConstantKind,
    pub value: String,
    pub stype: TypeHandle,
}

/// One element of a tuple; `name` is present iff the tuple is named.
#[derive(Debug, Clone)]
pub struct TupleElement {
    pub name: Option<String>,
    pub val: NodeId,
}

/// Named or positional tuple. Elements keep insertion order.
#[derive(Debug, Clone)]
pub struct TupleNode {
    pub named: bool,
    pub elements: Vec<TupleElement>,
    pub stype: Option<TypeHandle>,
}

#[derive(Debug, Clone)]
pub struct ArrayNode {
    pub elements: Vec<NodeId>,
}

/// Set-combining operation.
///
/// Operand cardinalities are stored independently; the merged value is
/// always [`SetOpNode::merged_cardinality`], never their sum.
#[derive(Debug, Clone)]
pub struct SetOpNode {
    pub op: SetOperator,
    pub left: SetId,
    pub right: SetId,
    pub left_card: Cardinality,
    pub right_card: Cardinality,
    /// The operands are statically known disjoint, so the backend may
    /// skip duplicate elimination. A proof obligation of the caller,
    /// never inferred here.
    pub exclusive: bool,
}

impl SetOpNode {
    pub fn merged_cardinality(&self) -> Cardinality {
        self.left_card.join(self.right_card)
    }
}

#[derive(Debug, Clone)]
pub struct BinOpNode {
    pub op: BinOperator,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone)]
pub struct UnaryOpNode {
    pub op: UnaryOperator,
    pub expr: NodeId,
}

/// `EXISTS` / `NOT EXISTS`.
#[derive(Debug, Clone)]
pub struct ExistPredNode {
    pub expr: SetId,
    pub negated: bool,
}

#[derive(Debug, Clone)]
pub struct DistinctNode {
    pub expr: NodeId,
}

#[derive(Debug, Clone)]
pub struct EquivalenceOpNode {
    pub op: EquivalenceOperator,
    pub left: NodeId,
    pub right: NodeId,
}

/// `left IS right` where `right` is a type expression or an array of
/// type expressions.
#[derive(Debug, Clone)]
pub struct TypeCheckOpNode {
    pub op: TypeCheckOperator,
    pub left: SetId,
    pub right: NodeId,
}

/// Ternary conditional. Branch cardinalities are tracked independently.
#[derive(Debug, Clone)]
pub struct IfElseNode {
    pub condition: SetId,
    pub if_expr: SetId,
    pub else_expr: SetId,
    pub if_expr_card: Cardinality,
    pub else_expr_card: Cardinality,
}

impl IfElseNode {
    /// Lattice join of the branches. `AtMostOne` or weaker whenever
    /// either branch is not provably `One`.
    pub fn merged_cardinality(&self) -> Cardinality {
        self.if_expr_card.join(self.else_expr_card)
    }
}

/// `left ?? right`. Only the fallback's cardinality is stored; the left
/// side contributes at most one element by the operator's semantics.
#[derive(Debug, Clone)]
pub struct CoalesceNode {
    pub left: SetId,
    pub right: SetId,
    pub right_card: Cardinality,
}

impl CoalesceNode {
    pub fn merged_cardinality(&self) -> Cardinality {
        Cardinality::AtMostOne.join(self.right_card)
    }
}

/// One `ORDER BY` key.
#[derive(Debug, Clone)]
pub struct SortExprNode {
    pub expr: NodeId,
    pub direction: SortDirection,
    pub empties: EmptiesOrder,
}

/// `expr.name` on a tuple; mints a sub-path of the tuple's path.
#[derive(Debug, Clone)]
pub struct TupleIndirectionNode {
    pub expr: NodeId,
    pub name: String,
    pub path_id: PathId,
}

#[derive(Debug, Clone)]
pub struct IndexIndirectionNode {
    pub expr: NodeId,
    pub index: NodeId,
}

#[derive(Debug, Clone)]
pub struct SliceIndirectionNode {
    pub expr: NodeId,
    pub start: Option<NodeId>,
    pub stop: Option<NodeId>,
    pub step: Option<NodeId>,
}

/// `<Type>expr`.
#[derive(Debug, Clone)]
pub struct TypeCastNode {
    pub expr: NodeId,
    pub to_type: NodeId,
}

/// Closed, tag-dispatched node hierarchy. One variant per concrete node.
#[derive(Debug, Clone)]
pub enum Node {
    Set(SetNode),
    Pointer(PointerNode),
    TypeRef(TypeRefNode),
    Parameter(ParameterNode),
    Constant(ConstantNode),
    Tuple(TupleNode),
    Array(ArrayNode),
    SetOp(SetOpNode),
    BinOp(BinOpNode),
    UnaryOp(UnaryOpNode),
    ExistPred(ExistPredNode),
    Distinct(DistinctNode),
    EquivalenceOp(EquivalenceOpNode),
    TypeCheckOp(TypeCheckOpNode),
    IfElse(IfElseNode),
    Coalesce(CoalesceNode),
    Sort(SortExprNode),
    FunctionCall(FunctionCallNode),
    TupleIndirection(TupleIndirectionNode),
    IndexIndirection(IndexIndirectionNode),
    SliceIndirection(SliceIndirectionNode),
    TypeCast(TypeCastNode),
    Select(SelectStmtNode),
    Group(GroupStmtNode),
    Insert(InsertStmtNode),
    Update(UpdateStmtNode),
    Delete(DeleteStmtNode),
}

impl Node {
    /// Node kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Set(s) if s.empty => "EmptySet",
            Self::Set(_) => "Set",
            Self::Pointer(_) => "Pointer",
            Self::TypeRef(_) => "TypeRef",
            Self::Parameter(_) => "Parameter",
            Self::Constant(c) => c.kind.node_name(),
            Self::Tuple(_) => "Tuple",
            Self::Array(_) => "Array",
            Self::SetOp(_) => "SetOp",
            Self::BinOp(_) => "BinOp",
            Self::UnaryOp(_) => "UnaryOp",
            Self::ExistPred(_) => "ExistPred",
            Self::Distinct(_) => "DistinctOp",
            Self::EquivalenceOp(_) => "EquivalenceOp",
            Self::TypeCheckOp(_) => "TypeCheckOp",
            Self::IfElse(_) => "IfElseExpr",
            Self::Coalesce(_) => "Coalesce",
            Self::Sort(_) => "SortExpr",
            Self::FunctionCall(_) => "FunctionCall",
            Self::TupleIndirection(_) => "TupleIndirection",
            Self::IndexIndirection(_) => "IndexIndirection",
            Self::SliceIndirection(_) => "SliceIndirection",
            Self::TypeCast(_) => "TypeCast",
            Self::Select(_) => "SelectStmt",
            Self::Group(_) => "GroupStmt",
            Self::Insert(_) => "InsertStmt",
            Self::Update(_) => "UpdateStmt",
            Self::Delete(_) => "DeleteStmt",
        }
    }

    /// Shared statement header, when this node is a statement.
    pub fn stmt_core(&self) -> Option<&StmtCore> {
        match self {
            Self::Select(s) => Some(&s.core),
            Self::Group(g) => Some(&g.core),
            Self::Insert(i) => Some(&i.core),
            Self::Update(u) => Some(&u.core),
            Self::Delete(d) => Some(&d.core),
            _ => None,
        }
    }

    /// Invoke `visit` with every node handle this node links to.
    pub(crate) fn visit_children(&self, visit: &mut impl FnMut(NodeId)) {
        match self {
            Self::Set(s) => {
                if let Some(e) = s.expr {
                    visit(e);
                }
                if let Some(r) = s.rptr {
                    visit(r);
                }
                if let Some(v) = s.view_source {
                    visit(v.node());
                }
                for &el in &s.shape {
                    visit(el.node());
                }
            }
            Self::Pointer(p) => {
                visit(p.source.node());
                visit(p.target.node());
            }
            Self::TypeRef(t) => {
                for &st in &t.subtypes {
                    visit(st);
                }
            }
            Self::Parameter(_) | Self::Constant(_) => {}
            Self::Tuple(t) => {
                for el in &t.elements {
                    visit(el.val);
                }
            }
            Self::Array(a) => {
                for &el in &a.elements {
                    visit(el);
                }
            }
            Self::SetOp(s) => {
                visit(s.left.node());
                visit(s.right.node());
            }
            Self::BinOp(b) => {
                visit(b.left);
                visit(b.right);
            }
            Self::UnaryOp(u) => visit(u.expr),
            Self::ExistPred(e) => visit(e.expr.node()),
            Self::Distinct(d) => visit(d.expr),
            Self::EquivalenceOp(e) => {
                visit(e.left);
                visit(e.right);
            }
            Self::TypeCheckOp(t) => {
                visit(t.left.node());
                visit(t.right);
            }
            Self::IfElse(i) => {
                visit(i.condition.node());
                visit(i.if_expr.node());
                visit(i.else_expr.node());
            }
            Self::Coalesce(c) => {
                visit(c.left.node());
                visit(c.right.node());
            }
            Self::Sort(s) => visit(s.expr),
            Self::FunctionCall(f) => {
                if let Some(iv) = f.func_initial_value {
                    visit(iv);
                }
                for &a in &f.args {
                    visit(a);
                }
                for &s in &f.agg_sort {
                    visit(s);
                }
                if let Some(fl) = f.agg_filter {
                    visit(fl);
                }
                for &p in &f.partition {
                    visit(p);
                }
            }
            Self::TupleIndirection(t) => visit(t.expr),
            Self::IndexIndirection(i) => {
                visit(i.expr);
                visit(i.index);
            }
            Self::SliceIndirection(s) => {
                visit(s.expr);
                for part in [s.start, s.stop, s.step].into_iter().flatten() {
                    visit(part);
                }
            }
            Self::TypeCast(c) => {
                visit(c.expr);
                visit(c.to_type);
            }
            Self::Select(s) => {
                visit(s.core.result);
                if let Some(w) = s.where_clause {
                    visit(w);
                }
                for &o in &s.orderby {
                    visit(o);
                }
                if let Some(o) = s.offset {
                    visit(o);
                }
                if let Some(l) = s.limit {
                    visit(l);
                }
            }
            Self::Group(g) => {
                visit(g.core.result);
                visit(g.subject);
                for &k in &g.groupby {
                    visit(k);
                }
            }
            Self::Insert(i) => {
                visit(i.core.result);
                visit(i.subject.node());
            }
            Self::Update(u) => {
                visit(u.core.result);
                visit(u.subject.node());
                if let Some(w) = u.where_clause {
                    visit(w);
                }
            }
            Self::Delete(d) => {
                visit(d.core.result);
                visit(d.subject.node());
                if let Some(w) = d.where_clause {
                    visit(w);
                }
            }
        }
    }
}

impl IrArena {
    /// A set representing a bare type reference (`User`). Has neither a
    /// defining expression nor a producing pointer.
    pub fn root_set(&mut self, path_id: PathId, stype: TypeHandle) -> SetId {
        let id = self.alloc(Node::Set(SetNode::new(path_id, stype)));
        SetId::new(id)
    }

    /// A set defined by an expression (subquery results, computed
    /// values).
    pub fn computed_set(&mut self, path_id: PathId, stype: TypeHandle, expr: NodeId) -> SetId {
        let mut set = SetNode::new(path_id, stype);
        set.expr = Some(expr);
        SetId::new(self.alloc(Node::Set(set)))
    }

    /// The statically empty set of `stype`.
    pub fn empty_set(&mut self, path_id: PathId, stype: TypeHandle) -> SetId {
        let mut set = SetNode::new(path_id, stype);
        set.empty = true;
        SetId::new(self.alloc(Node::Set(set)))
    }

    /// Traverse a pointer from `source`, producing `target`.
    ///
    /// Allocates the `Pointer` node and attaches it as `target`'s
    /// `rptr`. Fails when `target` is already defined by an expression
    /// or another traversal.
    pub fn pointer(
        &mut self,
        source: SetId,
        target: SetId,
        ptrcls: PointerHandle,
        direction: Direction,
        anchor: Option<String>,
    ) -> Result<NodeId> {
        {
            let t = self.ensure_set(target);
            if t.expr.is_some() || t.rptr.is_some() {
                return Err(IrError::Inconsistent(format!(
                    "set {} is already defined; a set has at most one of expr/rptr",
                    target.node().as_u32()
                )));
            }
        }
        let ptr = self.alloc(Node::Pointer(PointerNode {
            source,
            target,
            ptrcls,
            direction,
            anchor,
        }));
        self.ensure_set_mut(target).rptr = Some(ptr);
        Ok(ptr)
    }

    /// Record the projection of `set`. Write-once: the shape is fixed
    /// when the enclosing projection has been fully compiled.
    pub fn set_shape(&mut self, set: SetId, shape: Vec<SetId>) -> Result<()> {
        let s = self.ensure_set_mut(set);
        if !s.shape.is_empty() {
            return Err(IrError::Inconsistent(format!(
                "shape of set {} is already fixed",
                set.node().as_u32()
            )));
        }
        s.shape = shape;
        Ok(())
    }

    /// Attach `set` to its scope-tree region. Write-once, assigned by
    /// the scoping pass.
    pub fn set_path_scope(&mut self, set: SetId, region: RegionId) -> Result<()> {
        let s = self.ensure_set_mut(set);
        if s.path_scope_id.is_some() {
            return Err(IrError::Inconsistent(format!(
                "set {} is already attached to a scope region",
                set.node().as_u32()
            )));
        }
        s.path_scope_id = Some(region);
        Ok(())
    }

    /// Label `set` for readable re-display.
    pub fn set_anchor(&mut self, set: SetId, anchor: impl Into<String>) {
        self.ensure_set_mut(set).anchor = Some(anchor.into());
    }

    /// Construct a constant.
    ///
    /// Unlike most nodes, whose type may be bound after construction, a
    /// constant missing its `value` or `stype` is a hard error here.
    pub fn constant(
        &mut self,
        kind: ConstantKind,
        value: Option<String>,
        stype: Option<TypeHandle>,
    ) -> Result<NodeId> {
        let stype = stype.ok_or(IrError::Construction {
            node: kind.node_name(),
            attribute: "stype",
        })?;
        let value = value.ok_or(IrError::Construction {
            node: kind.node_name(),
            attribute: "value",
        })?;
        Ok(self.alloc(Node::Constant(ConstantNode { kind, value, stype })))
    }

    pub fn parameter(&mut self, name: impl Into<String>, stype: TypeHandle) -> NodeId {
        self.alloc(Node::Parameter(ParameterNode {
            name: name.into(),
            stype,
        }))
    }

    /// Construct a tuple. Element names must agree with `named`.
    pub fn tuple(
        &mut self,
        named: bool,
        elements: Vec<TupleElement>,
        stype: Option<TypeHandle>,
    ) -> Result<NodeId> {
        if elements.iter().any(|el| el.name.is_some() != named) {
            return Err(IrError::Inconsistent(
                "tuple element names must agree with the tuple's named flag".into(),
            ));
        }
        Ok(self.alloc(Node::Tuple(TupleNode {
            named,
            elements,
            stype,
        })))
    }

    pub fn array(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.alloc(Node::Array(ArrayNode { elements }))
    }

    /// Type expression node. All subtypes must themselves be type
    /// expressions.
    pub fn type_ref(&mut self, maintype: impl Into<String>, subtypes: Vec<NodeId>) -> Result<NodeId> {
        for &st in &subtypes {
            if !matches!(self.node(st), Node::TypeRef(_)) {
                return Err(IrError::Inconsistent(format!(
                    "TypeRef subtype must be a TypeRef, got {}",
                    self.node(st).kind()
                )));
            }
        }
        Ok(self.alloc(Node::TypeRef(TypeRefNode {
            maintype: maintype.into(),
            subtypes,
        })))
    }

    pub fn set_op(
        &mut self,
        op: SetOperator,
        left: SetId,
        right: SetId,
        left_card: Cardinality,
        right_card: Cardinality,
        exclusive: bool,
    ) -> NodeId {
        self.alloc(Node::SetOp(SetOpNode {
            op,
            left,
            right,
            left_card,
            right_card,
            exclusive,
        }))
    }

    pub fn bin_op(&mut self, op: BinOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(Node::BinOp(BinOpNode { op, left, right }))
    }

    pub fn unary_op(&mut self, op: UnaryOperator, expr: NodeId) -> NodeId {
        self.alloc(Node::UnaryOp(UnaryOpNode { op, expr }))
    }

    pub fn exist_pred(&mut self, expr: SetId, negated: bool) -> NodeId {
        self.alloc(Node::ExistPred(ExistPredNode { expr, negated }))
    }

    pub fn distinct(&mut self, expr: NodeId) -> NodeId {
        self.alloc(Node::Distinct(DistinctNode { expr }))
    }

    pub fn equivalence_op(
        &mut self,
        op: EquivalenceOperator,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        self.alloc(Node::EquivalenceOp(EquivalenceOpNode { op, left, right }))
    }

    /// `IS`/`IS NOT` check. The right side must be a type expression or
    /// an array of type expressions.
    pub fn type_check_op(
        &mut self,
        op: TypeCheckOperator,
        left: SetId,
        right: NodeId,
    ) -> Result<NodeId> {
        if !matches!(self.node(right), Node::TypeRef(_) | Node::Array(_)) {
            return Err(IrError::Inconsistent(format!(
                "TypeCheckOp right operand must be a TypeRef or Array, got {}",
                self.node(right).kind()
            )));
        }
        Ok(self.alloc(Node::TypeCheckOp(TypeCheckOpNode { op, left, right })))
    }

    pub fn if_else(
        &mut self,
        condition: SetId,
        if_expr: SetId,
        else_expr: SetId,
        if_expr_card: Cardinality,
        else_expr_card: Cardinality,
    ) -> NodeId {
        self.alloc(Node::IfElse(IfElseNode {
            condition,
            if_expr,
            else_expr,
            if_expr_card,
            else_expr_card,
        }))
    }

    pub fn coalesce(&mut self, left: SetId, right: SetId, right_card: Cardinality) -> NodeId {
        self.alloc(Node::Coalesce(CoalesceNode {
            left,
            right,
            right_card,
        }))
    }

    pub fn sort_expr(
        &mut self,
        expr: NodeId,
        direction: SortDirection,
        empties: EmptiesOrder,
    ) -> NodeId {
        self.alloc(Node::Sort(SortExprNode {
            expr,
            direction,
            empties,
        }))
    }

    pub fn tuple_indirection(
        &mut self,
        expr: NodeId,
        name: impl Into<String>,
        path_id: PathId,
    ) -> NodeId {
        self.alloc(Node::TupleIndirection(TupleIndirectionNode {
            expr,
            name: name.into(),
            path_id,
        }))
    }

    pub fn index_indirection(&mut self, expr: NodeId, index: NodeId) -> NodeId {
        self.alloc(Node::IndexIndirection(IndexIndirectionNode { expr, index }))
    }

    pub fn slice_indirection(
        &mut self,
        expr: NodeId,
        start: Option<NodeId>,
        stop: Option<NodeId>,
        step: Option<NodeId>,
    ) -> NodeId {
        self.alloc(Node::SliceIndirection(SliceIndirectionNode {
            expr,
            start,
            stop,
            step,
        }))
    }

    /// Construct a cast. Both the source expression and the target type
    /// expression are required.
    pub fn type_cast(&mut self, expr: Option<NodeId>, to_type: Option<NodeId>) -> Result<NodeId> {
        let expr = expr.ok_or(IrError::Construction {
            node: "TypeCast",
            attribute: "expr",
        })?;
        let to_type = to_type.ok_or(IrError::Construction {
            node: "TypeCast",
            attribute: "type",
        })?;
        if !matches!(self.node(to_type), Node::TypeRef(_)) {
            return Err(IrError::Inconsistent(format!(
                "TypeCast target must be a TypeRef, got {}",
                self.node(to_type).kind()
            )));
        }
        Ok(self.alloc(Node::TypeCast(TypeCastNode { expr, to_type })))
    }
}
