//! Node storage and handles.
//!
//! All IR nodes live in one [`IrArena`] per compilation, addressed by
//! stable [`NodeId`] handles. A set selected from several projections is
//! simply several handles to the same slot, which makes the
//! DAG-not-tree structure of the IR explicit.
//!
//! Source locations live in a side-table keyed by handle, so structural
//! equality and serialization of nodes are context-free by construction.

use trailql_core::SourceSpan;

use crate::node::Node;

/// Handle to a node in an [`IrArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle known to address a `Set` node.
///
/// Minted only by the `Set` constructors, so holding one is proof the
/// slot contains a set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SetId(NodeId);

impl SetId {
    pub fn node(self) -> NodeId {
        self.0
    }

    pub(crate) fn new(id: NodeId) -> Self {
        Self(id)
    }
}

/// Arena owning every node of one compiled query.
#[derive(Debug, Clone, Default)]
pub struct IrArena {
    nodes: Vec<Node>,
    spans: Vec<Option<SourceSpan>>,
}

impl IrArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.spans.push(None);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Source location of a node, if it has one.
    ///
    /// Compiler-synthesized nodes have none; the driver reports those
    /// with its own context.
    pub fn span(&self, id: NodeId) -> Option<SourceSpan> {
        self.spans[id.index()]
    }

    /// Attach a source location for diagnostics.
    pub fn set_span(&mut self, id: NodeId, span: SourceSpan) {
        self.spans[id.index()] = Some(span);
    }

    /// Typed access to a set node.
    pub fn set_node(&self, id: SetId) -> &crate::node::SetNode {
        self.ensure_set(id)
    }

    /// Typed access to a pointer node. Panics when `id` does not
    /// address a `Pointer`; minting such an id is a compiler bug.
    pub fn pointer_node(&self, id: NodeId) -> &crate::node::PointerNode {
        self.ensure_pointer(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Every node reachable from `from`, in depth-first order.
    ///
    /// Shared subgraphs are visited once; the rptr/target backlink pair
    /// between a set and its producing pointer is cycle-safe.
    pub fn reachable(&self, from: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![from];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            if seen[id.index()] {
                continue;
            }
            seen[id.index()] = true;
            out.push(id);
            self.node(id).visit_children(&mut |child| stack.push(child));
        }
        out
    }
}
