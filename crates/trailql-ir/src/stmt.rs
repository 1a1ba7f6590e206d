//! Statement nodes.
//!
//! Statements share a [`StmtCore`] header: the result expression, the
//! statement's overall cardinality, and links to the enclosing and
//! iterating statements (`FOR` semantics). Consumers reach the header
//! uniformly through `Node::stmt_core`.

use trailql_core::{Cardinality, PathId};

use crate::arena::{IrArena, NodeId, SetId};
use crate::node::Node;
use crate::{IrError, Result};

/// Fields shared by every statement node.
#[derive(Debug, Clone)]
pub struct StmtCore {
    pub name: Option<String>,
    pub result: NodeId,
    pub cardinality: Cardinality,
    /// Statement this one is textually nested in.
    pub parent_stmt: Option<NodeId>,
    /// `FOR` statement driving this one, when iterated.
    pub iterator_stmt: Option<NodeId>,
}

impl StmtCore {
    pub fn new(result: NodeId, cardinality: Cardinality) -> Self {
        Self {
            name: None,
            result,
            cardinality,
            parent_stmt: None,
            iterator_stmt: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn parent(mut self, stmt: NodeId) -> Self {
        self.parent_stmt = Some(stmt);
        self
    }

    pub fn iterator(mut self, stmt: NodeId) -> Self {
        self.iterator_stmt = Some(stmt);
        self
    }
}

/// `SELECT` with its clauses.
#[derive(Debug, Clone)]
pub struct SelectStmtNode {
    pub core: StmtCore,
    pub where_clause: Option<NodeId>,
    pub orderby: Vec<NodeId>,
    pub offset: Option<NodeId>,
    pub limit: Option<NodeId>,
}

impl SelectStmtNode {
    pub fn new(core: StmtCore) -> Self {
        Self {
            core,
            where_clause: None,
            orderby: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    pub fn filtered(mut self, where_clause: NodeId) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    pub fn ordered(mut self, orderby: Vec<NodeId>) -> Self {
        self.orderby = orderby;
        self
    }

    pub fn offset(mut self, offset: NodeId) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: NodeId) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// `GROUP`: the grouped subject, the grouping keys, and the result as a
/// nested select over the groups. `group_path_id` names the synthetic
/// path each group is addressable by.
#[derive(Debug, Clone)]
pub struct GroupStmtNode {
    pub core: StmtCore,
    pub subject: NodeId,
    pub groupby: Vec<NodeId>,
    pub group_path_id: PathId,
}

#[derive(Debug, Clone)]
pub struct InsertStmtNode {
    pub core: StmtCore,
    pub subject: SetId,
}

#[derive(Debug, Clone)]
pub struct UpdateStmtNode {
    pub core: StmtCore,
    pub subject: SetId,
    pub where_clause: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct DeleteStmtNode {
    pub core: StmtCore,
    pub subject: SetId,
    pub where_clause: Option<NodeId>,
}

impl IrArena {
    pub fn select_stmt(&mut self, stmt: SelectStmtNode) -> NodeId {
        self.alloc(Node::Select(stmt))
    }

    /// Allocate a group statement. Its result must be a nested select.
    pub fn group_stmt(&mut self, stmt: GroupStmtNode) -> Result<NodeId> {
        if !matches!(self.node(stmt.core.result), Node::Select(_)) {
            return Err(IrError::Inconsistent(format!(
                "GroupStmt result must be a SelectStmt, got {}",
                self.node(stmt.core.result).kind()
            )));
        }
        Ok(self.alloc(Node::Group(stmt)))
    }

    pub fn insert_stmt(&mut self, stmt: InsertStmtNode) -> NodeId {
        self.alloc(Node::Insert(stmt))
    }

    pub fn update_stmt(&mut self, stmt: UpdateStmtNode) -> NodeId {
        self.alloc(Node::Update(stmt))
    }

    pub fn delete_stmt(&mut self, stmt: DeleteStmtNode) -> NodeId {
        self.alloc(Node::Delete(stmt))
    }
}
