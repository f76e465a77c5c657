use serde::{Deserialize, Serialize};

use crate::model::{NodeId, Rgb, Tree};

/// Axis-aligned integer rectangle. Negative extents are legal layout input
/// and flow through the partition arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0, y: 0, w: 0, h: 0 };

    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Rect { x, y, w, h }
    }

    /// Bounds-inclusive containment on all four edges. A rectangle with a
    /// negative extent contains nothing.
    pub fn contains(&self, px: i64, py: i64) -> bool {
        self.x <= px && px <= self.x + self.w && self.y <= py && py <= self.y + self.h
    }
}

/// One displayed leaf's share of the draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub rect: Rect,
    pub color: Rgb,
}

/// Lay out the subtree under `id` to fill `bounds`.
///
/// A zero-weight subtree collapses to the zero rectangle whatever the
/// bounds. Leaves and unexpanded nodes take the bounds whole. An expanded
/// internal node is sliced along its longer axis (left to right when
/// `w > h`, top to bottom otherwise), one slab per child in child order:
/// every slab but the last gets the truncated proportional share of the
/// axis, the last absorbs the remainder so the slabs tile the bounds
/// exactly. Products are widened to `i128`, so a huge axis times a huge
/// weight cannot overflow.
pub fn layout(tree: &mut Tree, id: NodeId, bounds: Rect) {
    if tree.node(id).weight == 0 {
        tree.node_mut(id).rect = Rect::ZERO;
        let children = tree.node(id).children.clone();
        for child in children {
            layout(tree, child, Rect::ZERO);
        }
        return;
    }
    if tree.node(id).children.is_empty() || !tree.node(id).expanded {
        tree.node_mut(id).rect = bounds;
        return;
    }
    tree.node_mut(id).rect = bounds;

    let children = tree.node(id).children.clone();
    let total = tree.node(id).weight;
    let horizontal = bounds.w > bounds.h;
    let axis = if horizontal { bounds.w } else { bounds.h };
    let mut offset: i64 = 0;
    for (i, child) in children.iter().enumerate() {
        let length = if i == children.len() - 1 {
            axis - offset
        } else {
            (axis as i128 * tree.node(*child).weight as i128 / total as i128) as i64
        };
        let slab = if horizontal {
            Rect::new(bounds.x + offset, bounds.y, length, bounds.h)
        } else {
            Rect::new(bounds.x, bounds.y + offset, bounds.w, length)
        };
        layout(tree, *child, slab);
        offset += length;
    }
}

/// The displayed leaves under `id` in pre-order, child order: every node
/// that is a leaf or unexpanded, skipping zero-weight subtrees entirely.
pub fn displayed(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    collect_displayed(tree, id, &mut out);
    out
}

fn collect_displayed(tree: &Tree, id: NodeId, out: &mut Vec<NodeId>) {
    let node = tree.node(id);
    if node.weight == 0 {
        return;
    }
    if node.children.is_empty() || !node.expanded {
        out.push(id);
        return;
    }
    for child in &node.children {
        collect_displayed(tree, *child, out);
    }
}

/// The draw list for the subtree under `id`: one `Tile` per displayed leaf,
/// in the same order `displayed` reports them.
pub fn tiles(tree: &Tree, id: NodeId) -> Vec<Tile> {
    displayed(tree, id)
        .into_iter()
        .map(|leaf| {
            let node = tree.node(leaf);
            Tile {
                rect: node.rect,
                color: node.color,
            }
        })
        .collect()
}

/// The displayed leaf whose rectangle contains `pos`, or `None`. Edges
/// count as inside, and children are probed in child order, so a point on
/// a shared edge resolves to the leftmost/topmost rectangle.
pub fn node_at(tree: &Tree, id: NodeId, pos: (i64, i64)) -> Option<NodeId> {
    let node = tree.node(id);
    if node.weight == 0 {
        return None;
    }
    if node.children.is_empty() || !node.expanded {
        if node.rect.contains(pos.0, pos.1) {
            return Some(id);
        }
        return None;
    }
    for child in &node.children {
        if let Some(hit) = node_at(tree, *child, pos) {
            return Some(hit);
        }
    }
    None
}

/// Mark `id` expanded if it has children, then re-lay-out its subtree on
/// its current rectangle.
pub fn expand(tree: &mut Tree, id: NodeId) {
    if !tree.node(id).children.is_empty() {
        tree.node_mut(id).expanded = true;
    }
    let rect = tree.node(id).rect;
    layout(tree, id, rect);
}

/// Expand `id` and every internal node below it, top down.
pub fn expand_all(tree: &mut Tree, id: NodeId) {
    if tree.node(id).children.is_empty() {
        return;
    }
    expand(tree, id);
    let children = tree.node(id).children.clone();
    for child in children {
        expand_all(tree, child);
    }
}

/// Collapse the whole subtree rooted at `id`'s parent. The granularity is
/// deliberately coarse: folding any node folds everything under its parent,
/// so the parent becomes a single displayed leaf. Does nothing on a root.
pub fn collapse(tree: &mut Tree, id: NodeId) {
    if let Some(parent) = tree.node(id).parent {
        collapse_subtree(tree, parent);
    }
}

/// Collapse the entire tree containing `id`, reducing the display to one
/// rectangle at the root.
pub fn collapse_all(tree: &mut Tree, id: NodeId) {
    let top = tree.top_ancestor(id);
    collapse_subtree(tree, top);
}

fn collapse_subtree(tree: &mut Tree, id: NodeId) {
    if !tree.node(id).children.is_empty() {
        tree.node_mut(id).expanded = false;
        let children = tree.node(id).children.clone();
        for child in children {
            collapse_subtree(tree, child);
        }
    }
    let rect = tree.node(id).rect;
    layout(tree, id, rect);
}
