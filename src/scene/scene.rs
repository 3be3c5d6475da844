use glam::Affine3A;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// The avatar scene graph.
///
/// Owns every node of a loaded model. Animation bindings resolve bone names
/// through the name index; when several nodes share a name the first one
/// added wins.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: String,
    nodes: SlotMap<NodeHandle, Node>,
    roots: Vec<NodeHandle>,
    name_index: FxHashMap<String, NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Inserts `node` under `parent`, or as a root when `parent` is `None`.
    pub fn add_node(&mut self, mut node: Node, parent: Option<NodeHandle>) -> NodeHandle {
        let parent = parent.filter(|p| self.nodes.contains_key(*p));
        node.parent = parent;
        let name = node.name.clone();
        let handle = self.nodes.insert(node);

        match parent {
            Some(p) => self.nodes[p].children.push(handle),
            None => self.roots.push(handle),
        }
        self.name_index.entry(name).or_insert(handle);

        handle
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.name_index.get(name).copied()
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    /// Recomputes local and world matrices top-down.
    ///
    /// A world matrix is rebuilt when its own local matrix or any ancestor
    /// changed.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = self
            .roots
            .iter()
            .rev()
            .map(|&root| (root, Affine3A::IDENTITY, false))
            .collect();

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let changed = node.transform.update_local_matrix() || parent_changed;
            if changed {
                let world = parent_world * node.transform.local_matrix;
                node.transform.set_world_matrix(world);
            }

            let world = node.transform.world_matrix;
            stack.extend(node.children.iter().rev().map(|&child| (child, world, changed)));
        }
    }
}
