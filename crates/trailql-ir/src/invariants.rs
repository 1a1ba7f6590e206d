//! Internal handle checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::arena::{IrArena, NodeId, SetId};
use crate::node::{Node, PointerNode, SetNode};

impl IrArena {
    pub(crate) fn ensure_set(&self, id: SetId) -> &SetNode {
        match self.node(id.node()) {
            Node::Set(s) => s,
            other => panic!(
                "IrArena: SetId {} addresses a {} node \
                 (SetId must only be minted by set constructors)",
                id.node().as_u32(),
                other.kind()
            ),
        }
    }

    pub(crate) fn ensure_set_mut(&mut self, id: SetId) -> &mut SetNode {
        match self.node_mut(id.node()) {
            Node::Set(s) => s,
            other => panic!(
                "IrArena: SetId {} addresses a {} node \
                 (SetId must only be minted by set constructors)",
                id.node().as_u32(),
                other.kind()
            ),
        }
    }

    pub(crate) fn ensure_pointer(&self, id: NodeId) -> &PointerNode {
        match self.node(id) {
            Node::Pointer(p) => p,
            other => panic!(
                "IrArena: node {} is a {}, expected Pointer",
                id.as_u32(),
                other.kind()
            ),
        }
    }
}
