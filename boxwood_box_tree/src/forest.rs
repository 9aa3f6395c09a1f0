// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena forest: structure, geometry derivation, and queries.

use alloc::{vec, vec::Vec};
use kurbo::Point;

use crate::geom::{BOUNDS_MARGIN, Bounds, Position, max_of, min_of, rotate_about};
use crate::types::{BoxNode, NodeFlags, NodeId};

/// An arena of boxes linked into trees by parent/child indices.
///
/// Slot 0 always holds the forest root ([`NodeId::ROOT`]), which can never be
/// removed. Children are kept in z-order: the last child paints last and is
/// hit-tested first.
///
/// ## Example
///
/// ```rust
/// use boxwood_box_tree::{BoxNode, Forest, Position};
///
/// let mut forest = Forest::new(BoxNode::new(0, 0, 400, 300, ""));
/// let a = forest.insert(Some(forest.root()), BoxNode::new(10, 10, 100, 50, "card"));
/// let b = forest.insert(Some(a), BoxNode::new(5, 5, 20, 20, "icon"));
///
/// assert_eq!(forest.absolute_position(b), Position::new(15, 15));
/// assert_eq!(forest.depth(b), 2);
/// ```
pub struct Forest {
    /// slots
    nodes: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Forest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Forest")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node: BoxNode,
}

impl Slot {
    fn new(generation: u32, node: BoxNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            node,
        }
    }
}

impl Forest {
    /// Create a forest whose root is `root`.
    pub fn new(root: BoxNode) -> Self {
        Self {
            nodes: vec![Some(Slot::new(NodeId::ROOT.1, root))],
            generations: vec![NodeId::ROOT.1],
            free_list: Vec::new(),
        }
    }

    /// The root of this forest.
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Insert a new node as the topmost child of `parent`, or unattached if `None`.
    ///
    /// An unattached node is stored in the arena but is unreachable from the root, so it is
    /// neither painted nor hit-tested until the caller links it.
    pub fn insert(&mut self, parent: Option<NodeId>, node: BoxNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Slot::new(generation, node));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Slot::new(generation, node)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree.
    ///
    /// Returns `false` (and does nothing) for stale identifiers and for the root.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == NodeId::ROOT || !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.slot(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.slot(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        true
    }

    /// Remove every node except the root.
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.ids().filter(|id| *id != NodeId::ROOT).collect();
        for id in ids {
            // Descendants of an earlier entry are already gone.
            self.remove(id);
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes, root included.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Live identifiers in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                NodeId::new(i as u32, n.generation)
            })
        })
    }

    /// Borrow a live node.
    pub fn get(&self, id: NodeId) -> Option<&BoxNode> {
        self.slot_opt(id).map(|s| &s.node)
    }

    /// Mutably borrow a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut BoxNode> {
        self.slot_opt_mut(id).map(|s| &mut s.node)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot_opt(id).and_then(|s| s.parent)
    }

    /// Get the children of a node in z-order, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slot_opt(id).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// Absolute position: the node's offset plus the offsets of all its ancestors.
    ///
    /// A parentless node's absolute position is its local position. Stale ids yield the origin.
    pub fn absolute_position(&self, id: NodeId) -> Position {
        let mut pos = Position::ZERO;
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(slot) = self.slot_opt(c) else {
                break;
            };
            pos = pos.offset_by(slot.node.position());
            current = slot.parent;
        }
        pos
    }

    /// Absolute axis-aligned bounds.
    ///
    /// Unrotated nodes report exactly their absolute rectangle. Rotated nodes report the
    /// envelope of their four corners rotated about the node center, grown by
    /// [`BOUNDS_MARGIN`] on every side.
    pub fn bounds(&self, id: NodeId) -> Bounds {
        let Some(node) = self.get(id) else {
            return Bounds::ZERO;
        };
        let p = self.absolute_position(id);
        if node.angle == 0.0 {
            return Bounds::new(p.x, p.y, node.width, node.height);
        }

        let pivot = Point::new(
            f64::from(p.x) + f64::from(node.width) / 2.0,
            f64::from(p.y) + f64::from(node.height) / 2.0,
        );
        let corners = [
            Position::new(p.x, p.y),
            Position::new(p.x + node.width, p.y),
            Position::new(p.x + node.width, p.y + node.height),
            Position::new(p.x, p.y + node.height),
        ]
        .map(|c| rotate_about(node.angle, c, pivot));
        let xs = corners.map(|c| c.x);
        let ys = corners.map(|c| c.y);

        let x = min_of(&xs) - BOUNDS_MARGIN;
        let y = min_of(&ys) - BOUNDS_MARGIN;
        Bounds::new(
            x,
            y,
            max_of(&xs) - x + BOUNDS_MARGIN,
            max_of(&ys) - y + BOUNDS_MARGIN,
        )
    }

    /// Absolute center point of the unrotated rectangle, rounded.
    pub fn center(&self, id: NodeId) -> Position {
        let Some(node) = self.get(id) else {
            return Position::ZERO;
        };
        let p = self.absolute_position(id);
        Bounds::new(p.x, p.y, node.width, node.height).center()
    }

    /// Number of parent links between `id` and the top of its tree.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            depth += 1;
            current = self.parent_of(p);
        }
        depth
    }

    /// Returns `true` if `point` lies strictly inside the node's absolute rectangle.
    ///
    /// Points on any edge are outside. Rotation is ignored, as for event routing.
    pub fn hit_test(&self, point: Position, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let p = self.absolute_position(id);
        point.x > p.x && point.x < p.x + node.width && point.y > p.y && point.y < p.y + node.height
    }

    /// Set or clear [`NodeFlags::USED`] on a node and every descendant.
    pub fn set_subtree_used(&mut self, id: NodeId, used: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slot_opt_mut(current) else {
                continue;
            };
            slot.node.flags.set(NodeFlags::USED, used);
            stack.extend(slot.children.iter().copied());
        }
    }

    /// All other children of the node's parent, in z-order.
    pub fn siblings_excluding_self(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent_of(id) else {
            return Vec::new();
        };
        self.children_of(parent)
            .iter()
            .copied()
            .filter(|c| *c != id)
            .collect()
    }

    /// Center-distance overlap test between the bounds of two nodes.
    ///
    /// The nodes overlap when, on both axes, the distance between their centers is smaller
    /// than half the sum of their extents. Touching edges do not overlap.
    pub fn overlaps(&self, a: NodeId, b: NodeId) -> bool {
        let (a, b) = (self.bounds(a), self.bounds(b));
        // Doubled coordinates keep the half-extents integral.
        let dx = ((2 * a.x + a.width) - (2 * b.x + b.width)).abs();
        let dy = ((2 * a.y + a.height) - (2 * b.y + b.height)).abs();
        dx < a.width + b.width && dy < a.height + b.height
    }

    /// Returns `true` if `id` is used, correct and selected, and overlaps any candidate.
    ///
    /// Nodes that are not in that state never report overlap.
    pub fn overlaps_any(&self, id: NodeId, candidates: &[NodeId]) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let eligible = node
            .flags
            .contains(NodeFlags::USED | NodeFlags::CORRECT | NodeFlags::SELECTED);
        eligible && candidates.iter().any(|c| self.overlaps(id, *c))
    }

    /// Recompute [`NodeFlags::CORRECT`] against the node's siblings.
    pub fn refresh_correctness(&mut self, id: NodeId) {
        let siblings = self.siblings_excluding_self(id);
        let correct = !self.overlaps_any(id, &siblings);
        if let Some(node) = self.get_mut(id) {
            node.flags.set(NodeFlags::CORRECT, correct);
        }
    }

    /// Paintable nodes in pre-order, starting below the root.
    ///
    /// Parents come before their children and siblings follow z-order. A node that is unused
    /// or selected is skipped together with its whole subtree.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(NodeId::ROOT).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(slot) = self.slot_opt(id) else {
                continue;
            };
            if !slot.node.is_used() || slot.node.is_selected() {
                continue;
            }
            out.push(id);
            // Reversed so children pop in z-order.
            stack.extend(slot.children.iter().rev().copied());
        }
        out
    }

    // --- internals ---

    fn slot(&self, id: NodeId) -> &Slot {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn slot_opt(&self, id: NodeId) -> Option<&Slot> {
        let s = self.nodes.get(id.idx())?.as_ref()?;
        (s.generation == id.1).then_some(s)
    }

    fn slot_opt_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let s = self.nodes.get_mut(id.idx())?.as_mut()?;
        if s.generation != id.1 {
            return None;
        }
        Some(s)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.slot_mut(parent).children.push(id);
        self.slot_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.slot_mut(parent).children.retain(|c| *c != id);
        self.slot_mut(id).parent = None;
    }
}
