// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display list: a by-value snapshot of everything to paint inside a region.

use alloc::vec::Vec;

use boxwood_box_tree::{Bounds, BoxTree, Forest, NodeId};

use crate::style::{Style, StyleSheet};

/// Which forest an item came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Content forest.
    Content,
    /// Overlay forest.
    Overlay,
}

/// One box to paint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayItem {
    /// Source forest.
    pub layer: Layer,
    /// Source node, for diagnostics.
    pub node: NodeId,
    /// Absolute, unrotated rectangle of the box.
    pub rect: Bounds,
    /// Rotation about the rectangle's center, in radians.
    pub angle: f64,
    /// Axis-aligned envelope of the rotated box.
    pub bounds: Bounds,
    /// Resolved style.
    pub style: Style,
}

/// Items in paint order: content before overlay, each forest in pre-order.
///
/// The list owns everything it needs, so it can be handed to another thread while the tree
/// keeps changing.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    /// Items, bottom to top.
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Snapshot every paintable box whose bounds intersect `region`.
    ///
    /// Forest roots are never painted. Unused and selected boxes are skipped together with
    /// their subtrees.
    pub fn capture(tree: &BoxTree, styles: &StyleSheet, region: Bounds) -> Self {
        let mut items = Vec::new();
        collect(tree.content(), Layer::Content, styles, region, &mut items);
        collect(tree.overlay(), Layer::Overlay, styles, region, &mut items);
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there is nothing to paint.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn collect(
    forest: &Forest,
    layer: Layer,
    styles: &StyleSheet,
    region: Bounds,
    out: &mut Vec<DisplayItem>,
) {
    for id in forest.paint_order() {
        let Some(node) = forest.get(id) else {
            continue;
        };
        let bounds = forest.bounds(id);
        if !bounds.intersects(region) {
            continue;
        }
        let p = forest.absolute_position(id);
        out.push(DisplayItem {
            layer,
            node: id,
            rect: Bounds::new(p.x, p.y, node.width, node.height),
            angle: node.angle,
            bounds,
            style: styles.get(&node.style_class),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxwood_box_tree::BoxNode;

    #[test]
    fn content_then_overlay_preorder() {
        let mut tree = BoxTree::new(800, 600);
        let root = tree.content_root();
        let a = tree.add_node(BoxNode::new(0, 0, 100, 100, "a"), Some(root));
        let a1 = tree.add_node(BoxNode::new(10, 10, 10, 10, "a1"), Some(a));
        let b = tree.add_node(BoxNode::new(200, 0, 100, 100, "b"), Some(root));
        let o = tree.add_overlay_node(BoxNode::new(0, 0, 100, 100, "hoverborder"), None);

        let list = DisplayList::capture(&tree, &StyleSheet::new(), Bounds::new(0, 0, 800, 600));
        let order: Vec<_> = list.items.iter().map(|i| (i.layer, i.node)).collect();
        assert_eq!(
            order,
            [
                (Layer::Content, a),
                (Layer::Content, a1),
                (Layer::Content, b),
                (Layer::Overlay, o)
            ]
        );
        assert_eq!(list.items[1].rect, Bounds::new(10, 10, 10, 10));
    }

    #[test]
    fn region_and_flags_filter() {
        let mut tree = BoxTree::new(800, 600);
        let root = tree.content_root();
        let a = tree.add_node(BoxNode::new(0, 0, 100, 100, ""), Some(root));
        let b = tree.add_node(BoxNode::new(200, 0, 100, 100, ""), Some(root));
        let c = tree.add_node(BoxNode::new(0, 0, 50, 50, ""), Some(root));
        tree.set_selected(c, true);

        let list = DisplayList::capture(&tree, &StyleSheet::new(), Bounds::new(0, 0, 150, 150));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items[0].node, a);

        tree.disable_subtree(a);
        let list = DisplayList::capture(&tree, &StyleSheet::new(), Bounds::new(0, 0, 800, 600));
        assert_eq!(list.items.iter().map(|i| i.node).collect::<Vec<_>>(), [b]);
    }
}
