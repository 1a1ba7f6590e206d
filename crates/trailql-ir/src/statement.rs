//! The compiled-statement root and session commands.
//!
//! A [`Statement`] is the single point where a fully bound expression
//! tree meets the bookkeeping needed to finish compilation: the
//! completed scope tree, the view shapes, and the source map used to
//! re-diagnose errors after optimization. [`StatementBuilder::finish`]
//! verifies the four are mutually consistent before the backend ever
//! sees them.

use indexmap::IndexMap;
use trailql_core::{
    Cardinality, ModuleHandle, PathId, PointerHandle, ScopeTree, SourceSpan, TypeHandle,
};

use crate::arena::{IrArena, SetId};
use crate::node::Node;
use crate::{IrError, Result};

/// Original source facts for one mutation pointer, kept so errors found
/// after optimization still point at the user's text.
#[derive(Debug, Clone)]
pub struct SourceMapEntry {
    pub span: Option<SourceSpan>,
    pub path_id: PathId,
}

/// The compiled-query root. Owns the whole node graph and its scope
/// tree; every shared `Set` lives exactly as long as the statement.
#[derive(Debug, Clone)]
pub struct Statement {
    pub arena: IrArena,
    /// Root set of the query.
    pub expr: SetId,
    /// Named view types bound in the query.
    pub views: IndexMap<String, TypeHandle>,
    /// Query parameter types by name.
    pub params: IndexMap<String, TypeHandle>,
    /// Overall result cardinality.
    pub cardinality: Cardinality,
    /// Result type of the whole query.
    pub stype: Option<TypeHandle>,
    pub scope_tree: ScopeTree,
    /// Relational scope label per materialized set.
    pub scope_map: IndexMap<SetId, String>,
    /// Pointers materializing each view type's projection.
    pub view_shapes: IndexMap<TypeHandle, Vec<PointerHandle>>,
    /// Per-mutation-pointer source facts.
    pub source_map: IndexMap<PointerHandle, SourceMapEntry>,
}

/// Assembles and verifies a [`Statement`].
pub struct StatementBuilder {
    arena: IrArena,
    expr: SetId,
    views: IndexMap<String, TypeHandle>,
    params: IndexMap<String, TypeHandle>,
    cardinality: Cardinality,
    stype: Option<TypeHandle>,
    scope_tree: ScopeTree,
    scope_map: IndexMap<SetId, String>,
    view_shapes: IndexMap<TypeHandle, Vec<PointerHandle>>,
    source_map: IndexMap<PointerHandle, SourceMapEntry>,
}

impl StatementBuilder {
    pub fn new(
        arena: IrArena,
        expr: SetId,
        cardinality: Cardinality,
        scope_tree: ScopeTree,
    ) -> Self {
        Self {
            arena,
            expr,
            views: IndexMap::new(),
            params: IndexMap::new(),
            cardinality,
            stype: None,
            scope_tree,
            scope_map: IndexMap::new(),
            view_shapes: IndexMap::new(),
            source_map: IndexMap::new(),
        }
    }

    pub fn stype(mut self, stype: TypeHandle) -> Self {
        self.stype = Some(stype);
        self
    }

    pub fn view(mut self, name: impl Into<String>, stype: TypeHandle) -> Self {
        self.views.insert(name.into(), stype);
        self
    }

    pub fn param(mut self, name: impl Into<String>, stype: TypeHandle) -> Self {
        self.params.insert(name.into(), stype);
        self
    }

    pub fn scope_label(mut self, set: SetId, label: impl Into<String>) -> Self {
        self.scope_map.insert(set, label.into());
        self
    }

    pub fn view_shape(mut self, stype: TypeHandle, pointers: Vec<PointerHandle>) -> Self {
        self.view_shapes.insert(stype, pointers);
        self
    }

    pub fn source_entry(mut self, pointer: PointerHandle, entry: SourceMapEntry) -> Self {
        self.source_map.insert(pointer, entry);
        self
    }

    /// Verify cross-references and produce the statement.
    ///
    /// Checks, before handing off to the backend:
    /// - every scope region referenced by a reachable set exists in the
    ///   scope tree, and the set's path is visible from that region;
    /// - every name in `views` has a `view_shapes` entry;
    /// - every `scope_map` key is reachable from the root expression.
    pub fn finish(self) -> Result<Statement> {
        let reachable = self.arena.reachable(self.expr.node());

        for &id in &reachable {
            let Node::Set(set) = self.arena.node(id) else {
                continue;
            };
            let Some(region) = set.path_scope_id else {
                continue;
            };
            if !self.scope_tree.contains(region) {
                return Err(IrError::Inconsistent(format!(
                    "set {} references scope region {} which is not in the scope tree",
                    id.as_u32(),
                    region.as_u32()
                )));
            }
            self.scope_tree.resolve(region, &set.path_id)?;
        }

        for (name, stype) in &self.views {
            if !self.view_shapes.contains_key(stype) {
                return Err(IrError::Inconsistent(format!(
                    "view {name} has no entry in view_shapes"
                )));
            }
        }

        for &set in self.scope_map.keys() {
            if !reachable.contains(&set.node()) {
                return Err(IrError::Inconsistent(format!(
                    "scope_map references set {} which is not reachable from the root",
                    set.node().as_u32()
                )));
            }
        }

        Ok(Statement {
            arena: self.arena,
            expr: self.expr,
            views: self.views,
            params: self.params,
            cardinality: self.cardinality,
            stype: self.stype,
            scope_tree: self.scope_tree,
            scope_map: self.scope_map,
            view_shapes: self.view_shapes,
            source_map: self.source_map,
        })
    }
}

/// Session/module-alias state change. Structurally a sibling of
/// [`Statement`]; never contains an expression tree.
#[derive(Debug, Clone)]
pub struct SessionStateCmd {
    /// Module alias rebindings; `None` keys the default module.
    pub module_aliases: IndexMap<Option<String>, ModuleHandle>,
    pub testmode: bool,
}

/// A compiled top-level command.
#[derive(Debug, Clone)]
pub enum Command {
    Statement(Box<Statement>),
    SessionState(SessionStateCmd),
}
