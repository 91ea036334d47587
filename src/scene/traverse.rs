//! Lazy pre-order traversal.
//!
//! The renderer walks the tree once per frame and needs each node paired
//! with its world transform. [`Traversal`] composes world matrices on the
//! way down with an explicit stack, so deep hierarchies cannot overflow
//! the call stack and no intermediate collection is built.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::node::Node;
use crate::scene::NodeHandle;

/// Depth-first pre-order iterator over a node tree.
///
/// Yields `(handle, node, world transform)`, parents before their
/// children, siblings in insertion order. The walk is finite and
/// restartable: every call to [`Scene::traverse`] starts a fresh one.
///
/// Stale child handles (possible only if the arena was edited through a
/// leaked low-level path) are skipped rather than reported.
///
/// [`Scene::traverse`]: crate::scene::Scene::traverse
pub struct Traversal<'a> {
    nodes: &'a SlotMap<NodeHandle, Node>,
    /// Pending nodes, each paired with its parent's world transform.
    stack: Vec<(NodeHandle, Affine3A)>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn from_roots(nodes: &'a SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) -> Self {
        let mut stack = Vec::with_capacity(roots.len());
        for &root in roots.iter().rev() {
            stack.push((root, Affine3A::IDENTITY));
        }
        Self { nodes, stack }
    }

    pub(crate) fn from_root(
        nodes: &'a SlotMap<NodeHandle, Node>,
        root: NodeHandle,
        parent_world: Affine3A,
    ) -> Self {
        Self {
            nodes,
            stack: vec![(root, parent_world)],
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (NodeHandle, &'a Node, Affine3A);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, parent_world) = self.stack.pop()?;
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };

            let world = parent_world * node.transform.local_affine();

            // Reverse push keeps siblings in insertion order
            for &child in node.children.iter().rev() {
                self.stack.push((child, world));
            }

            return Some((handle, node, world));
        }
    }
}
