// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-box state machine.

use boxwood_box_tree::NodeId;
use boxwood_pointer::PointerEvent;
use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::behavior::{Behavior, Reaction};
use crate::context::{InteractionContext, StateListener};
use crate::event::{BoxEvent, DEFAULT_TRANSITIONS, StateId};
use crate::state::StateObject;

/// A completed state change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Event that caused it.
    pub event: BoxEvent,
    /// State that was stopped.
    pub from: StateId,
    /// State that was started.
    pub to: StateId,
}

/// An abstract event emitted by a state's listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Emitted {
    /// Box whose state emitted it.
    pub node: NodeId,
    /// The event.
    pub event: BoxEvent,
    /// State change it caused, if any.
    pub transition: Option<Transition>,
}

/// State machine for one interactive box.
///
/// Holds a table of state objects and an event → state table. Exactly one state is current;
/// the machine starts in [`StateId::Normal`], and the Normal state object is started as soon as
/// it is added.
///
/// ## Example
///
/// ```rust
/// use boxwood_box_tree::{BoxNode, BoxTree, Damage};
/// use boxwood_interaction::{BoxEvent, BoxStateMachine, InteractionContext, StateId};
/// use boxwood_pointer::ListenerRegistry;
///
/// let mut tree = BoxTree::new(800, 600);
/// let card = tree.add_node(BoxNode::new(10, 10, 100, 50, "card"), Some(tree.content_root()));
/// let mut listeners = ListenerRegistry::new();
/// let mut damage = Damage::default();
/// let mut ctx = InteractionContext {
///     tree: &mut tree,
///     listeners: &mut listeners,
///     damage: &mut damage,
/// };
///
/// let mut machine = BoxStateMachine::with_default_table(card, "hoverborder", &mut ctx);
/// assert_eq!(machine.current(), StateId::Normal);
///
/// machine.transition(BoxEvent::In, &mut ctx);
/// assert_eq!(machine.current(), StateId::Hover);
/// assert_eq!(ctx.tree.overlay().children_of(ctx.tree.overlay_root()).len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct BoxStateMachine {
    target: NodeId,
    current: StateId,
    states: HashMap<StateId, StateObject>,
    events: HashMap<BoxEvent, StateId>,
}

impl BoxStateMachine {
    /// Create an empty machine whose current state is Normal.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            current: StateId::Normal,
            states: HashMap::new(),
            events: HashMap::new(),
        }
    }

    /// Create a machine with the Normal, Hover and Move states and the default table.
    pub fn with_default_table(
        target: NodeId,
        hover_style: &str,
        ctx: &mut InteractionContext<'_>,
    ) -> Self {
        let mut machine = Self::new(target);
        machine.add_states(
            [
                StateObject::new(StateId::Normal, Behavior::Normal, target, hover_style),
                StateObject::new(StateId::Hover, Behavior::Hover, target, hover_style),
                StateObject::new(StateId::Move, Behavior::Move, target, hover_style),
            ],
            ctx,
        );
        machine.add_events(DEFAULT_TRANSITIONS);
        machine
    }

    /// Box this machine drives.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Current state.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// State object for `id`, if registered.
    pub fn state(&self, id: StateId) -> Option<&StateObject> {
        self.states.get(&id)
    }

    /// Whether the state object for `id` exists and is running.
    pub fn is_running(&self, id: StateId) -> bool {
        self.states.get(&id).is_some_and(StateObject::is_running)
    }

    /// Register state objects, replacing any with the same id.
    ///
    /// A state whose id is the current state is started immediately.
    pub fn add_states(
        &mut self,
        states: impl IntoIterator<Item = StateObject>,
        ctx: &mut InteractionContext<'_>,
    ) {
        for mut state in states {
            let id = state.id();
            if let Some(mut old) = self.states.remove(&id)
                && old.is_running()
            {
                old.stop(ctx);
            }
            if id == self.current {
                state.start(ctx);
            }
            self.states.insert(id, state);
        }
    }

    /// Add event → state entries, replacing existing ones.
    pub fn add_events(&mut self, events: impl IntoIterator<Item = (BoxEvent, StateId)>) {
        self.events.extend(events);
    }

    /// Resolve `event` through the table and switch to the resulting state.
    ///
    /// Unknown events and events resolving to the current state do nothing.
    pub fn transition(
        &mut self,
        event: BoxEvent,
        ctx: &mut InteractionContext<'_>,
    ) -> Option<Transition> {
        let &to = self.events.get(&event)?;
        let from = self.current;
        if !self.open_state(to, ctx) {
            return None;
        }
        debug!(node = ?self.target, %event, %from, %to, "state transition");
        Some(Transition { event, from, to })
    }

    /// Jump straight to `state`. Returns `false` if it is already current.
    ///
    /// The current state object is stopped before the new one is started. A state without a
    /// registered object still becomes current; it simply has nothing to start.
    pub fn open_state(&mut self, state: StateId, ctx: &mut InteractionContext<'_>) -> bool {
        if self.current == state {
            return false;
        }
        if let Some(old) = self.states.get_mut(&self.current) {
            old.stop(ctx);
        }
        self.current = state;
        if let Some(new) = self.states.get_mut(&state) {
            new.start(ctx);
        }
        true
    }

    /// Run a listener reaction for `event`, if its owning state is still running.
    pub fn handle(
        &mut self,
        listener: &StateListener,
        event: &PointerEvent,
        ctx: &mut InteractionContext<'_>,
    ) -> Option<Emitted> {
        if !self.is_running(listener.state) {
            trace!(node = ?self.target, state = %listener.state, kind = %event.kind, "listener gated");
            return None;
        }
        match listener.reaction {
            Reaction::Emit(box_event) => Some(Emitted {
                node: self.target,
                event: box_event,
                transition: self.transition(box_event, ctx),
            }),
            Reaction::FollowPointer => {
                if let Some(state) = self.states.get_mut(&listener.state) {
                    state.follow_pointer(event, ctx);
                }
                None
            }
        }
    }

    /// Stop the current state, releasing its listeners and overlays.
    pub fn teardown(&mut self, ctx: &mut InteractionContext<'_>) {
        if let Some(state) = self.states.get_mut(&self.current)
            && state.is_running()
        {
            state.stop(ctx);
        }
    }
}
