//! Generic labeled tree storage.
//!
//! A small arena tree: nodes live in one `Vec`, identified by [`NodeId`], each
//! carrying a display `tag` and arbitrary `data`. The derivation resolver
//! builds its output here, but nothing in this module knows about pitches.
//!
//! Ordering guarantees, relied upon by consumers:
//!
//! - `NodeId`s are handed out in creation order.
//! - [`Tree::leaves`] yields childless nodes in creation order, which for a
//!   breadth-first producer means left-to-right within a depth level and
//!   shallow-before-deep across levels.

/// Identifier of a node inside one [`Tree`].
///
/// Ids are only meaningful for the tree that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub tag: String,
    pub data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena tree with exactly one root.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<TreeNode<T>>,
}

impl<T> Tree<T> {
    /// Create a tree consisting of a single root node.
    pub fn with_root(tag: impl Into<String>, data: T) -> Self {
        Self { nodes: vec![TreeNode { tag: tag.into(), data, parent: None, children: Vec::new() }] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent`, returning the new node's id.
    pub fn add_child(&mut self, parent: NodeId, tag: impl Into<String>, data: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode { tag: tag.into(), data, parent: Some(parent), children: Vec::new() });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> &TreeNode<T> {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// All childless nodes, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter(|(_, node)| node.children.is_empty()).map(|(index, _)| NodeId(index))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // a tree always has its root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only_tree_is_its_own_leaf() {
        let tree = Tree::with_root("root", 0);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![tree.root()]);
        assert_eq!(tree.depth(tree.root()), 0);
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn leaves_follow_creation_order() {
        let mut tree = Tree::with_root("r", 0);
        let a = tree.add_child(tree.root(), "a", 1);
        let b = tree.add_child(tree.root(), "b", 2);
        let a1 = tree.add_child(a, "a1", 3);
        let a2 = tree.add_child(a, "a2", 4);

        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![b, a1, a2]);
        assert_eq!(tree.children(tree.root()), &[a, b]);
        assert_eq!(tree.depth(a2), 2);
        assert_eq!(tree.get(a1).tag, "a1");
        assert_eq!(tree.get(a1).data, 3);
        assert_eq!(tree.parent(a1), Some(a));
    }
}
