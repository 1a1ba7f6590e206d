#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Typed intermediate representation for compiled TrailQL queries.
//!
//! The IR is a closed algebra of cardinality-annotated nodes stored in an
//! arena, each carrying the path identity that ties it back to "the same
//! real-world path" wherever it recurs:
//! - `arena` - node storage, handles, reachability
//! - `node` - the expression node algebra and its constructors
//! - `call` - bound function calls
//! - `stmt` - statement nodes (select/group/insert/update/delete)
//! - `statement` - the compiled-statement root and session commands
//!
//! Nodes are built bottom-up during a single compilation pass and never
//! mutated once linked into a parent; a correction means constructing a
//! replacement node. Sharing a `Set` across parents is multiple handles to
//! one arena slot, so the node graph is a DAG rather than a strict tree.

pub mod arena;
pub mod call;
pub mod node;
pub mod statement;
pub mod stmt;

mod invariants;

#[cfg(test)]
mod call_tests;
#[cfg(test)]
mod node_tests;

pub use arena::{IrArena, NodeId, SetId};
pub use call::{FunctionCallBuilder, FunctionCallNode, SetModifier, TypeModifier};
pub use node::{
    ArrayNode, BinOpNode, BinOperator, CoalesceNode, ConstantKind, ConstantNode, DistinctNode,
    EmptiesOrder, EquivalenceOpNode, EquivalenceOperator, ExistPredNode, IfElseNode,
    IndexIndirectionNode, Node, ParameterNode, PointerNode, SetNode, SetOpNode, SetOperator,
    SliceIndirectionNode, SortDirection, SortExprNode, TupleElement, TupleIndirectionNode,
    TupleNode, TypeCastNode, TypeCheckOpNode, TypeCheckOperator, TypeRefNode, UnaryOpNode,
    UnaryOperator,
};
pub use statement::{Command, SessionStateCmd, SourceMapEntry, Statement, StatementBuilder};
pub use stmt::{
    DeleteStmtNode, GroupStmtNode, InsertStmtNode, SelectStmtNode, StmtCore, UpdateStmtNode,
};

use trailql_core::ScopeError;

/// Errors raised by IR construction and statement assembly.
///
/// All of these are fatal to the current compilation and propagate
/// unhandled to the compilation driver, which attaches source context.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IrError {
    /// A node was built without a required attribute.
    #[error("cannot construct {node} without {attribute}")]
    Construction {
        node: &'static str,
        attribute: &'static str,
    },

    /// A path reference violates scope-tree visibility.
    #[error(transparent)]
    InvalidScopeConfiguration(#[from] ScopeError),

    /// Any other core-invariant violation. Distinguishes "this query is
    /// invalid" from "the compiler itself is buggy" by kind, not by
    /// message matching.
    #[error("inconsistent IR: {0}")]
    Inconsistent(String),
}

/// Result type for IR operations.
pub type Result<T> = std::result::Result<T, IrError>;
