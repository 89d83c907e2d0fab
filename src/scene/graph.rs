use slotmap::SlotMap;

use crate::scene::node::Node;
use crate::scene::texture::Texture;
use crate::scene::{NodeKey, TextureKey};

/// A loaded scene graph: node hierarchy plus the textures its materials use.
///
/// Pure data. A [`SceneContext`](crate::context::SceneContext) owns at most
/// one graph (its model); cameras and lights live on the context itself.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,
    pub textures: SlotMap<TextureKey, Texture>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Adds a node as the last child of `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeKey) -> NodeKey {
        let key = self.nodes.insert(child);
        self.link(key, parent);
        key
    }

    /// Re-parents an existing node.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent || !self.nodes.contains_key(parent) {
            return;
        }
        let old_parent = match self.nodes.get(child) {
            Some(node) => node.parent,
            None => return,
        };
        match old_parent {
            Some(old) => {
                if let Some(p) = self.nodes.get_mut(old) {
                    p.children.retain(|&c| c != child);
                }
            }
            None => self.root_nodes.retain(|&r| r != child),
        }
        self.link(child, parent);
    }

    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureKey {
        self.textures.insert(texture)
    }

    /// Depth-first pre-order walk over every node reachable from the roots.
    #[must_use]
    pub fn traverse(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeKey> = self.root_nodes.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            if let Some(node) = self.nodes.get(key) {
                order.push(key);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Finds the first node named `name` below `root` (inclusive).
    #[must_use]
    pub fn find_by_name(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        let node = self.nodes.get(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_by_name(child, name))
    }

    /// Number of reachable nodes carrying a mesh.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.traverse()
            .into_iter()
            .filter(|&key| self.nodes[key].mesh.is_some())
            .count()
    }
}
