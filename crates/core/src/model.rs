use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::treemap::{self, Rect};

/// Index of a node in its `Tree`'s arena. Ids are only meaningful for the
/// tree that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A single weighted node. A `None` name marks an empty placeholder node,
/// which never has children, a parent, or weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: Option<String>,
    pub weight: u64,
    pub rect: Rect,
    pub color: Rgb,
    pub expanded: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Parent-linked weighted tree backed by a flat arena. Nodes are never
/// removed from the arena; `delete` only unlinks them, so every `NodeId`
/// stays valid for the lifetime of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node adopting `children` (inserted earlier, bottom-up).
    ///
    /// `weight` is taken as-is for childless or empty nodes; otherwise it is
    /// ignored and the weights of the non-empty children are summed. The new
    /// node becomes the tree's root, so building bottom-up ends with the real
    /// root in place.
    pub fn insert(&mut self, name: Option<String>, children: Vec<NodeId>, weight: u64) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        let mut rng = rand::thread_rng();
        let color = Rgb(rng.gen(), rng.gen(), rng.gen());
        let weight = if name.is_none() || children.is_empty() {
            weight
        } else {
            let mut sum: u64 = 0;
            for child in &children {
                let node = self.node(*child);
                if node.name.is_some() {
                    sum = sum.saturating_add(node.weight);
                }
            }
            sum
        };
        for child in &children {
            self.node_mut(*child).parent = Some(id);
        }
        self.nodes.push(TreeNode {
            name,
            weight,
            rect: Rect::ZERO,
            color,
            expanded: false,
            parent: None,
            children,
        });
        self.root = Some(id);
        id
    }

    pub fn leaf(&mut self, name: impl Into<String>, weight: u64) -> NodeId {
        self.insert(Some(name.into()), Vec::new(), weight)
    }

    pub fn branch(&mut self, name: impl Into<String>, children: Vec<NodeId>) -> NodeId {
        self.insert(Some(name.into()), children, 0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn top_ancestor(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(parent) = self.node(cur).parent {
            cur = parent;
        }
        cur
    }

    /// Recompute internal weights bottom-up from the leaves and return the
    /// node's new weight. Leaf weights are left untouched.
    pub fn recompute_weights(&mut self, id: NodeId) -> u64 {
        if self.node(id).children.is_empty() {
            return self.node(id).weight;
        }
        let children = self.node(id).children.clone();
        let mut sum: u64 = 0;
        for child in children {
            sum = sum.saturating_add(self.recompute_weights(child));
        }
        self.node_mut(id).weight = sum;
        sum
    }

    /// Move a leaf to the end of `dest`'s children. Does nothing unless `id`
    /// is a named leaf with a parent and `dest` has children. Moving a leaf
    /// to its own parent reorders it to the end.
    pub fn move_to(&mut self, id: NodeId, dest: NodeId) {
        if !self.node(id).children.is_empty() || self.node(id).name.is_none() {
            return;
        }
        if self.node(dest).children.is_empty() {
            return;
        }
        let old_parent = match self.node(id).parent {
            Some(p) => p,
            None => return,
        };
        self.node_mut(dest).children.push(id);
        if let Some(pos) = self.node(old_parent).children.iter().position(|c| *c == id) {
            self.node_mut(old_parent).children.remove(pos);
        }
        if self.node(old_parent).children.is_empty() {
            let parent = self.node_mut(old_parent);
            parent.weight = 0;
            parent.expanded = false;
        }
        let top = self.top_ancestor(dest);
        self.recompute_weights(top);
        self.node_mut(id).parent = Some(dest);
    }

    /// Adjust a leaf's weight by `factor` rounded away from zero, never below
    /// one. Does nothing for internal or empty nodes.
    pub fn change_weight(&mut self, id: NodeId, factor: f64) {
        if !self.node(id).children.is_empty() || self.node(id).name.is_none() {
            return;
        }
        let delta = if factor >= 0.0 {
            factor.ceil()
        } else {
            factor.floor()
        };
        let next = (self.node(id).weight as i128).saturating_add(delta as i128);
        self.node_mut(id).weight = next.clamp(1, u64::MAX as i128) as u64;
        let top = self.top_ancestor(id);
        self.recompute_weights(top);
    }

    /// Unlink a node from its parent, re-laying-out the parent's subtree in
    /// place. Returns false for a parentless node. The unlinked node keeps
    /// its `parent` field so callers can still navigate back up.
    pub fn delete(&mut self, id: NodeId) -> bool {
        let parent = match self.node(id).parent {
            Some(p) => p,
            None => return false,
        };
        if let Some(pos) = self.node(parent).children.iter().position(|c| *c == id) {
            self.node_mut(parent).children.remove(pos);
        }
        if self.node(parent).children.is_empty() {
            let node = self.node_mut(parent);
            node.weight = 0;
            node.expanded = false;
        }
        let rect = self.node(parent).rect;
        treemap::layout(self, parent, rect);
        let top = self.top_ancestor(parent);
        self.recompute_weights(top);
        true
    }
}
