// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture state: `None -> Pending -> Dragging -> None`.
//!
//! A press arms a gesture on the deepest node under the pointer. The first move promotes it to a
//! drag and emits `DRAGSTART` at the press coordinates; every move while dragging emits `DRAG`; a
//! release emits `DRAGEND` only if the gesture was promoted. A press followed directly by a
//! release never produces drag events.
//!
//! ```
//! use boxwood_box_tree::{NodeId, Position};
//! use boxwood_pointer::{DragPhase, DragState, PointerEventKind};
//!
//! let mut drag = DragState::default();
//! drag.on_down(NodeId::ROOT, Position::new(10, 10), Position::new(0, 0));
//! assert_eq!(drag.phase(), DragPhase::Pending);
//!
//! let steps = drag.on_move(Position::new(12, 10));
//! let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
//! assert_eq!(kinds, [PointerEventKind::DragStart, PointerEventKind::Drag]);
//!
//! assert!(drag.on_up(Position::new(12, 10)).is_some());
//! assert_eq!(drag.phase(), DragPhase::None);
//! ```

use boxwood_box_tree::{NodeId, Position};
use smallvec::SmallVec;

use crate::kind::PointerEventKind;

/// Phase of the drag gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No press is active.
    #[default]
    None,
    /// Pressed, not yet moved.
    Pending,
    /// Moved at least once while pressed.
    Dragging,
}

/// One drag event to deliver to the gesture target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DragStep {
    /// Node the gesture started on.
    pub target: NodeId,
    /// `DragStart`, `Drag` or `DragEnd`.
    pub kind: PointerEventKind,
    /// Absolute pointer position reported with the event.
    pub position: Position,
    /// Pointer position minus the target's absolute position, captured at press.
    pub offset: Position,
}

/// Pipeline-scoped drag gesture record.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    target: Option<NodeId>,
    phase: DragPhase,
    down: Position,
    offset: Position,
}

impl DragState {
    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Node the active gesture started on.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Absolute pointer position of the press.
    pub fn down_position(&self) -> Position {
        self.down
    }

    /// Offset captured at press.
    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Returns `true` once the gesture has moved.
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Arm a gesture on `target`, pressed at `at`, whose absolute origin is `target_origin`.
    ///
    /// A press while another gesture is active restarts the gesture.
    pub fn on_down(&mut self, target: NodeId, at: Position, target_origin: Position) {
        self.target = Some(target);
        self.phase = DragPhase::Pending;
        self.down = at;
        self.offset = at.delta_from(target_origin);
    }

    /// Advance on a pointer move, returning the drag events to deliver in order.
    pub fn on_move(&mut self, at: Position) -> SmallVec<[DragStep; 2]> {
        let mut steps = SmallVec::new();
        let Some(target) = self.target else {
            return steps;
        };
        if self.phase == DragPhase::Pending {
            self.phase = DragPhase::Dragging;
            steps.push(self.step(target, PointerEventKind::DragStart, self.down));
        }
        if self.phase == DragPhase::Dragging {
            steps.push(self.step(target, PointerEventKind::Drag, at));
        }
        steps
    }

    /// Finish the gesture on release, returning `DragEnd` if it was dragging.
    ///
    /// The state is reset in every case.
    pub fn on_up(&mut self, at: Position) -> Option<DragStep> {
        let end = match (self.phase, self.target) {
            (DragPhase::Dragging, Some(target)) => {
                Some(self.step(target, PointerEventKind::DragEnd, at))
            }
            _ => None,
        };
        self.reset();
        end
    }

    /// Drop any active gesture.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn step(&self, target: NodeId, kind: PointerEventKind, position: Position) -> DragStep {
        DragStep {
            target,
            kind,
            position,
            offset: self.offset,
        }
    }
}
