// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing: turn one pointer sample into an ordered delivery plan.
//!
//! ## Semantics
//!
//! For every sample the pipeline:
//!
//! 1. Builds the bubbling chain from the content root down to the deepest box containing the
//!    pointer, testing children topmost first. If the root does not contain the pointer the
//!    chain is empty and nothing is emitted; hover and drag state are left untouched.
//! 2. Emits `MOUSELEAVE` to the previous top box and `MOUSEENTER` to the new one when the
//!    deepest box changes. The root never receives either.
//! 3. Advances the [`DragState`] and emits its drag events to the gesture target.
//! 4. Emits the primitive event to the chain, root first, stopping after the first box that
//!    does not bubble.

use alloc::vec::Vec;

use boxwood_box_tree::{BoxTree, NodeId, Position};
use smallvec::SmallVec;
use tracing::trace;

use crate::drag::{DragState, DragStep};
use crate::kind::{PointerEventKind, RawPointerKind};
use crate::listener::{ListenerId, ListenerRegistry};

/// One raw pointer sample from the host, in absolute coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerSample {
    /// Sample kind.
    pub kind: RawPointerKind,
    /// Pointer position.
    pub position: Position,
}

impl PointerSample {
    /// Create a sample.
    pub const fn new(kind: RawPointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Position::new(x, y),
        }
    }
}

/// An event addressed to one node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Receiving node.
    pub target: NodeId,
    /// Event kind.
    pub kind: PointerEventKind,
    /// Absolute pointer position.
    pub position: Position,
    /// Drag offset, present on drag events only.
    pub offset: Option<Position>,
}

impl PointerEvent {
    fn plain(target: NodeId, kind: PointerEventKind, position: Position) -> Self {
        Self {
            target,
            kind,
            position,
            offset: None,
        }
    }
}

impl From<DragStep> for PointerEvent {
    fn from(step: DragStep) -> Self {
        Self {
            target: step.target,
            kind: step.kind,
            position: step.position,
            offset: Some(step.offset),
        }
    }
}

/// Nodes from the root down to the deepest box containing a point.
pub type BubblingChain = SmallVec<[NodeId; 8]>;

/// Build the bubbling chain for `point` over the content forest.
///
/// Each entry is a child of the previous one, and the first entry is the content root. The
/// chain is empty when the root does not contain the point. Disabled boxes, and so their
/// subtrees, are never hit.
pub fn bubbling_chain(tree: &BoxTree, point: Position) -> BubblingChain {
    let mut chain = BubblingChain::new();
    let mut current = tree.content_root();
    if !tree.hit_test(point, current) {
        return chain;
    }
    chain.push(current);
    // Topmost child wins.
    while let Some(&hit) = tree
        .children_of(current)
        .iter()
        .rev()
        .find(|c| tree.get(**c).is_some_and(|n| n.is_used()) && tree.hit_test(point, **c))
    {
        chain.push(hit);
        current = hit;
    }
    chain
}

/// Hover and drag state carried between samples.
#[derive(Clone, Debug, Default)]
pub struct PointerPipeline {
    top_box: Option<NodeId>,
    drag: DragState,
}

impl PointerPipeline {
    /// Create a pipeline with no hovered box and no gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest box hit by the last sample that hit anything.
    pub fn top_box(&self) -> Option<NodeId> {
        self.top_box
    }

    /// Drag gesture state.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Forget the hovered box and any active gesture.
    pub fn reset(&mut self) {
        self.top_box = None;
        self.drag.reset();
    }

    /// Route `sample` and return the events to deliver, in delivery order.
    ///
    /// The plan is computed against the tree as it is now. Listeners that mutate the tree while
    /// the plan is delivered do not alter the plan.
    ///
    /// A sample that misses the root produces no events, but a release there still ends any
    /// active gesture.
    pub fn route(&mut self, sample: PointerSample, tree: &BoxTree) -> Vec<PointerEvent> {
        let at = sample.position;
        let chain = bubbling_chain(tree, at);
        let mut plan = Vec::new();
        let Some(&deepest) = chain.last() else {
            trace!(x = at.x, y = at.y, "sample outside root");
            if matches!(sample.kind, RawPointerKind::Up) {
                self.drag.reset();
            }
            return plan;
        };
        let root = tree.content_root();

        if self.top_box != Some(deepest) {
            if let Some(old) = self.top_box
                && old != root
            {
                plan.push(PointerEvent::plain(old, PointerEventKind::MouseLeave, at));
            }
            self.top_box = Some(deepest);
            if deepest != root {
                plan.push(PointerEvent::plain(deepest, PointerEventKind::MouseEnter, at));
            }
        }

        match sample.kind {
            RawPointerKind::Down => {
                self.drag.on_down(deepest, at, tree.absolute_position(deepest));
            }
            RawPointerKind::Move => {
                plan.extend(self.drag.on_move(at).into_iter().map(PointerEvent::from));
            }
            RawPointerKind::Up => {
                plan.extend(self.drag.on_up(at).map(PointerEvent::from));
            }
            RawPointerKind::Click | RawPointerKind::DoubleClick => {}
        }

        let primitive = sample.kind.primitive();
        for &node in &chain {
            plan.push(PointerEvent::plain(node, primitive, at));
            if !tree.get(node).is_some_and(|n| n.can_bubble()) {
                break;
            }
        }

        trace!(
            kind = ?sample.kind,
            x = at.x,
            y = at.y,
            depth = chain.len(),
            events = plan.len(),
            "routed"
        );
        plan
    }

    /// Route `sample` and invoke `handler` for every matching listener, in order.
    ///
    /// Listeners are looked up when each event is reached. Returns the number of handler calls.
    pub fn dispatch<A>(
        &mut self,
        sample: PointerSample,
        tree: &BoxTree,
        listeners: &ListenerRegistry<A>,
        mut handler: impl FnMut(&PointerEvent, ListenerId, &A),
    ) -> usize {
        let mut calls = 0;
        for event in self.route(sample, tree) {
            for listener in listeners.matching(event.target, event.kind) {
                handler(&event, listener.id, &listener.action);
                calls += 1;
            }
        }
        calls
    }
}
