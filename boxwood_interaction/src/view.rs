// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay views: decorations in the overlay forest that track a content box.

use alloc::string::String;

use boxwood_box_tree::{BoxNode, NodeId};
use tracing::debug;

use crate::context::InteractionContext;

/// A border drawn in the overlay forest over a content box.
///
/// The overlay node exists only between [`render`](Self::render) and [`close`](Self::close).
#[derive(Clone, Debug)]
pub struct BorderView {
    target: NodeId,
    style_class: String,
    overlay: Option<NodeId>,
}

impl BorderView {
    /// Create a closed view over `target`.
    pub fn new(target: NodeId, style_class: impl Into<String>) -> Self {
        Self {
            target,
            style_class: style_class.into(),
            overlay: None,
        }
    }

    /// Content box this view decorates.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Overlay node, while rendered.
    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    /// Add the overlay node, matching the target's absolute geometry, and damage its area.
    pub fn render(&mut self, ctx: &mut InteractionContext<'_>) {
        if self.overlay.is_some_and(|o| ctx.tree.overlay().is_alive(o)) {
            self.refresh(ctx);
            return;
        }
        let Some(node) = self.shadow(ctx) else {
            return;
        };
        let id = ctx.tree.add_overlay_node(node, None);
        self.overlay = Some(id);
        ctx.damage.push(ctx.tree.overlay().bounds(id));
        debug!(target_node = ?self.target, overlay = ?id, style = %self.style_class, "overlay added");
    }

    /// Copy the target's current absolute geometry onto the overlay node.
    pub fn refresh(&mut self, ctx: &mut InteractionContext<'_>) {
        let Some(id) = self.overlay else {
            return;
        };
        let Some(shadow) = self.shadow(ctx) else {
            return;
        };
        if let Some(node) = ctx.tree.overlay_mut().get_mut(id) {
            node.x = shadow.x;
            node.y = shadow.y;
            node.width = shadow.width;
            node.height = shadow.height;
            node.angle = shadow.angle;
        }
    }

    /// Remove the overlay node and damage the area it covered.
    pub fn close(&mut self, ctx: &mut InteractionContext<'_>) {
        let Some(id) = self.overlay.take() else {
            return;
        };
        ctx.damage.push(ctx.tree.overlay().bounds(id));
        if ctx.tree.remove_overlay_node(id) {
            debug!(target_node = ?self.target, overlay = ?id, "overlay removed");
        }
    }

    fn shadow(&self, ctx: &InteractionContext<'_>) -> Option<BoxNode> {
        let target = ctx.tree.get(self.target)?;
        let p = ctx.tree.absolute_position(self.target);
        Some(
            BoxNode::new(p.x, p.y, target.width, target.height, self.style_class.as_str())
                .with_angle(target.angle),
        )
    }
}
