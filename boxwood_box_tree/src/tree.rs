// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The box tree: a content forest plus an overlay forest over one viewport.

use alloc::vec::Vec;

use crate::forest::Forest;
use crate::geom::{Bounds, Position};
use crate::types::{BoxNode, NodeFlags, NodeId};

/// Content and overlay forests sharing one viewport.
///
/// Content-layer queries (`absolute_position`, `bounds`, `hit_test`, …) are forwarded to the
/// content forest. Use [`BoxTree::overlay`] for the same queries on overlay nodes.
#[derive(Debug)]
pub struct BoxTree {
    content: Forest,
    overlay: Forest,
}

impl BoxTree {
    /// Create a tree whose two roots span a `width` × `height` viewport.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            content: Forest::new(BoxNode::new(0, 0, width, height, "")),
            overlay: Forest::new(BoxNode::new(0, 0, width, height, "")),
        }
    }

    /// Root of the content forest.
    pub const fn content_root(&self) -> NodeId {
        self.content.root()
    }

    /// Root of the overlay forest.
    pub const fn overlay_root(&self) -> NodeId {
        self.overlay.root()
    }

    /// The content forest.
    pub fn content(&self) -> &Forest {
        &self.content
    }

    /// The content forest, mutably.
    pub fn content_mut(&mut self) -> &mut Forest {
        &mut self.content
    }

    /// The overlay forest.
    pub fn overlay(&self) -> &Forest {
        &self.overlay
    }

    /// The overlay forest, mutably.
    pub fn overlay_mut(&mut self) -> &mut Forest {
        &mut self.overlay
    }

    /// Viewport size, as spanned by the content root.
    pub fn size(&self) -> (i32, i32) {
        let root = self.content.get(self.content_root());
        root.map(|r| (r.width, r.height)).unwrap_or((0, 0))
    }

    /// Resize both roots to a new viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        for forest in [&mut self.content, &mut self.overlay] {
            let root = forest.root();
            if let Some(r) = forest.get_mut(root) {
                r.width = width;
                r.height = height;
            }
        }
    }

    // --- content layer ---

    /// Add a content node, appended as the topmost child of `parent` if given.
    pub fn add_node(&mut self, node: BoxNode, parent: Option<NodeId>) -> NodeId {
        self.content.insert(parent, node)
    }

    /// Clear [`NodeFlags::USED`] on a content node and all its descendants.
    pub fn disable_subtree(&mut self, id: NodeId) {
        self.content.set_subtree_used(id, false);
    }

    /// Set [`NodeFlags::USED`] on a content node and all its descendants.
    pub fn enable_subtree(&mut self, id: NodeId) {
        self.content.set_subtree_used(id, true);
    }

    /// Borrow a content node.
    pub fn get(&self, id: NodeId) -> Option<&BoxNode> {
        self.content.get(id)
    }

    /// Mutably borrow a content node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut BoxNode> {
        self.content.get_mut(id)
    }

    /// Parent of a content node.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.content.parent_of(id)
    }

    /// Children of a content node in z-order.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.content.children_of(id)
    }

    /// Move a content node to a new parent-relative position.
    pub fn set_position(&mut self, id: NodeId, position: Position) {
        if let Some(n) = self.content.get_mut(id) {
            n.x = position.x;
            n.y = position.y;
        }
    }

    /// Resize a content node.
    pub fn set_size(&mut self, id: NodeId, width: i32, height: i32) {
        if let Some(n) = self.content.get_mut(id) {
            n.width = width;
            n.height = height;
        }
    }

    /// Rotate a content node about its center.
    pub fn set_angle(&mut self, id: NodeId, angle: f64) {
        if let Some(n) = self.content.get_mut(id) {
            n.angle = angle;
        }
    }

    /// Mark a content node selected or not.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        self.set_flag(id, NodeFlags::SELECTED, selected);
    }

    /// Allow or stop pointer events propagating past a content node.
    pub fn set_can_bubble(&mut self, id: NodeId, bubbles: bool) {
        self.set_flag(id, NodeFlags::BUBBLES, bubbles);
    }

    fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(n) = self.content.get_mut(id) {
            n.flags.set(flag, on);
        }
    }

    /// See [`Forest::absolute_position`].
    pub fn absolute_position(&self, id: NodeId) -> Position {
        self.content.absolute_position(id)
    }

    /// See [`Forest::bounds`].
    pub fn bounds(&self, id: NodeId) -> Bounds {
        self.content.bounds(id)
    }

    /// See [`Forest::center`].
    pub fn center(&self, id: NodeId) -> Position {
        self.content.center(id)
    }

    /// See [`Forest::depth`].
    pub fn depth(&self, id: NodeId) -> usize {
        self.content.depth(id)
    }

    /// See [`Forest::hit_test`].
    pub fn hit_test(&self, point: Position, id: NodeId) -> bool {
        self.content.hit_test(point, id)
    }

    /// See [`Forest::overlaps_any`].
    pub fn overlaps_any(&self, id: NodeId, candidates: &[NodeId]) -> bool {
        self.content.overlaps_any(id, candidates)
    }

    /// See [`Forest::siblings_excluding_self`].
    pub fn siblings_excluding_self(&self, id: NodeId) -> Vec<NodeId> {
        self.content.siblings_excluding_self(id)
    }

    /// See [`Forest::refresh_correctness`].
    pub fn refresh_correctness(&mut self, id: NodeId) {
        self.content.refresh_correctness(id);
    }

    // --- overlay layer ---

    /// Add an overlay node under `parent`, or under the overlay root if `None`.
    pub fn add_overlay_node(&mut self, node: BoxNode, parent: Option<NodeId>) -> NodeId {
        let parent = parent.unwrap_or(self.overlay.root());
        self.overlay.insert(Some(parent), node)
    }

    /// Remove an overlay node and its subtree.
    ///
    /// Removing a node that is already gone, or the overlay root, does nothing.
    pub fn remove_overlay_node(&mut self, id: NodeId) -> bool {
        self.overlay.remove(id)
    }

    /// Drop every overlay node except the overlay root.
    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }
}
