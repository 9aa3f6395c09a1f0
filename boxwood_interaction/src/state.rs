// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One interaction state of one box: running flag, overlay views, and live listener handles.

use alloc::vec::Vec;

use boxwood_box_tree::{NodeId, Position};
use boxwood_pointer::{ListenerId, PointerEvent};
use smallvec::SmallVec;

use crate::behavior::Behavior;
use crate::context::{InteractionContext, StateListener};
use crate::event::StateId;
use crate::view::BorderView;

/// A state instance bound to a target box.
///
/// Listeners exist exactly while the state runs: [`start`](Self::start) registers them and
/// [`stop`](Self::stop) removes them.
#[derive(Clone, Debug)]
pub struct StateObject {
    id: StateId,
    target: NodeId,
    behavior: Behavior,
    running: bool,
    views: Vec<BorderView>,
    listeners: SmallVec<[ListenerId; 2]>,
}

impl StateObject {
    /// Create a stopped state for `target`. Border overlays of the built-in hover and move
    /// behaviors use `hover_style`.
    pub fn new(id: StateId, behavior: Behavior, target: NodeId, hover_style: &str) -> Self {
        let views = behavior
            .overlay_styles(hover_style)
            .into_iter()
            .map(|style| BorderView::new(target, style))
            .collect();
        Self {
            id,
            target,
            behavior,
            running: false,
            views,
            listeners: SmallVec::new(),
        }
    }

    /// State identifier.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Target box.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Behavior.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Whether the state is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Overlay views.
    pub fn views(&self) -> &[BorderView] {
        &self.views
    }

    /// Render overlays, then register listeners.
    pub fn start(&mut self, ctx: &mut InteractionContext<'_>) {
        self.running = true;
        for view in &mut self.views {
            view.render(ctx);
        }
        for &(kind, reaction) in self.behavior.reactions() {
            let action = StateListener {
                owner: self.target,
                state: self.id,
                reaction,
            };
            self.listeners.push(ctx.listeners.add(self.target, kind, action));
        }
    }

    /// Close overlays, then remove listeners.
    pub fn stop(&mut self, ctx: &mut InteractionContext<'_>) {
        self.running = false;
        for view in &mut self.views {
            view.close(ctx);
        }
        for id in self.listeners.drain(..) {
            ctx.listeners.remove(self.target, id);
        }
    }

    /// Move the target so that it sits at the pointer minus the drag offset.
    ///
    /// Damages the union of the target's bounds before and after the move.
    pub fn follow_pointer(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) {
        let before = ctx.tree.bounds(self.target);
        let offset = event.offset.unwrap_or(Position::ZERO);
        let parent_origin = ctx
            .tree
            .parent_of(self.target)
            .map(|p| ctx.tree.absolute_position(p))
            .unwrap_or(Position::ZERO);
        let local = event.position.delta_from(offset).delta_from(parent_origin);
        ctx.tree.set_position(self.target, local);
        for view in &mut self.views {
            view.refresh(ctx);
        }
        let after = ctx.tree.bounds(self.target);
        ctx.damage.push(before.union(after));
    }
}
