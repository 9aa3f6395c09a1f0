// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Every box's machine plus the listener registry their states share.

use alloc::string::String;

use boxwood_box_tree::{BoxTree, Damage, NodeId};
use boxwood_pointer::{ListenerId, ListenerRegistry, PointerEvent};
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::context::{InteractionContext, StateListener};
use crate::event::{BoxEvent, StateId};
use crate::machine::{BoxStateMachine, Emitted, Transition};
use crate::state::StateObject;

/// Machines keyed by the box they drive.
#[derive(Debug)]
pub struct Interactions {
    machines: HashMap<NodeId, BoxStateMachine>,
    listeners: ListenerRegistry<StateListener>,
    hover_style: String,
}

impl Interactions {
    /// Create an empty set. Built-in border overlays use `hover_style`.
    pub fn new(hover_style: impl Into<String>) -> Self {
        Self {
            machines: HashMap::new(),
            listeners: ListenerRegistry::new(),
            hover_style: hover_style.into(),
        }
    }

    /// Style class of the built-in hover and move borders.
    pub fn hover_style(&self) -> &str {
        &self.hover_style
    }

    /// Listener registry shared by the machines.
    pub fn listeners(&self) -> &ListenerRegistry<StateListener> {
        &self.listeners
    }

    /// Machine driving `node`.
    pub fn machine(&self, node: NodeId) -> Option<&BoxStateMachine> {
        self.machines.get(&node)
    }

    /// Current state of `node`'s machine.
    pub fn state_of(&self, node: NodeId) -> Option<StateId> {
        self.machines.get(&node).map(BoxStateMachine::current)
    }

    /// Attach a machine with the default Normal/Hover/Move table to `node`.
    ///
    /// Replaces any machine already driving `node`.
    pub fn attach(&mut self, node: NodeId, tree: &mut BoxTree, damage: &mut Damage) {
        self.detach(node, tree, damage);
        let mut ctx = InteractionContext {
            tree,
            listeners: &mut self.listeners,
            damage,
        };
        let machine = BoxStateMachine::with_default_table(node, &self.hover_style, &mut ctx);
        self.machines.insert(node, machine);
        debug!(?node, "interaction attached");
    }

    /// Attach a machine built from custom states and transitions.
    pub fn attach_custom(
        &mut self,
        node: NodeId,
        states: impl IntoIterator<Item = StateObject>,
        events: impl IntoIterator<Item = (BoxEvent, StateId)>,
        tree: &mut BoxTree,
        damage: &mut Damage,
    ) {
        self.detach(node, tree, damage);
        let mut ctx = InteractionContext {
            tree,
            listeners: &mut self.listeners,
            damage,
        };
        let mut machine = BoxStateMachine::new(node);
        machine.add_states(states, &mut ctx);
        machine.add_events(events);
        self.machines.insert(node, machine);
        debug!(?node, "custom interaction attached");
    }

    /// Tear down and drop the machine driving `node`. Returns `false` if there was none.
    pub fn detach(&mut self, node: NodeId, tree: &mut BoxTree, damage: &mut Damage) -> bool {
        let Some(mut machine) = self.machines.remove(&node) else {
            return false;
        };
        let mut ctx = InteractionContext {
            tree,
            listeners: &mut self.listeners,
            damage,
        };
        machine.teardown(&mut ctx);
        self.listeners.remove_all(node);
        debug!(?node, "interaction detached");
        true
    }

    /// Send an abstract event straight to `node`'s machine.
    pub fn transition(
        &mut self,
        node: NodeId,
        event: BoxEvent,
        tree: &mut BoxTree,
        damage: &mut Damage,
    ) -> Option<Transition> {
        let machine = self.machines.get_mut(&node)?;
        let mut ctx = InteractionContext {
            tree,
            listeners: &mut self.listeners,
            damage,
        };
        machine.transition(event, &mut ctx)
    }

    /// Deliver one routed pointer event to the listeners on its target.
    ///
    /// Listeners are resolved now, in registration order. A listener removed by an earlier
    /// listener of the same event is skipped. Returns the abstract events emitted.
    pub fn deliver(
        &mut self,
        event: &PointerEvent,
        tree: &mut BoxTree,
        damage: &mut Damage,
    ) -> SmallVec<[Emitted; 2]> {
        let snapshot: SmallVec<[(ListenerId, StateListener); 4]> = self
            .listeners
            .matching(event.target, event.kind)
            .map(|l| (l.id, l.action))
            .collect();
        let mut emitted = SmallVec::new();
        for (id, listener) in snapshot {
            if !self.listeners.contains(event.target, id) {
                continue;
            }
            let Some(machine) = self.machines.get_mut(&listener.owner) else {
                continue;
            };
            let mut ctx = InteractionContext {
                tree: &mut *tree,
                listeners: &mut self.listeners,
                damage: &mut *damage,
            };
            emitted.extend(machine.handle(&listener, event, &mut ctx));
        }
        emitted
    }

    /// Tear down every machine.
    pub fn clear(&mut self, tree: &mut BoxTree, damage: &mut Damage) {
        let nodes: SmallVec<[NodeId; 8]> = self.machines.keys().copied().collect();
        for node in nodes {
            self.detach(node, tree, damage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use boxwood_box_tree::{BoxNode, Position};
    use boxwood_pointer::{PointerEventKind, PointerPipeline, PointerSample, RawPointerKind};

    fn drive(
        set: &mut Interactions,
        pipeline: &mut PointerPipeline,
        tree: &mut BoxTree,
        damage: &mut Damage,
        kind: RawPointerKind,
        x: i32,
        y: i32,
    ) -> Vec<Emitted> {
        let mut out = Vec::new();
        for event in pipeline.route(PointerSample::new(kind, x, y), tree) {
            out.extend(set.deliver(&event, tree, damage));
        }
        out
    }

    #[test]
    fn hover_move_cycle() {
        let mut tree = BoxTree::new(800, 600);
        let mut damage = Damage::default();
        let node = tree.add_node(BoxNode::new(10, 10, 100, 50, "card"), Some(tree.content_root()));
        let mut set = Interactions::new("hoverborder");
        set.attach(node, &mut tree, &mut damage);
        let mut pipeline = PointerPipeline::new();

        let ev = drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Move, 15, 15);
        assert_eq!(ev.iter().map(|e| e.event).collect::<Vec<_>>(), [BoxEvent::In]);
        assert_eq!(set.state_of(node), Some(StateId::Hover));

        drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Down, 20, 20);
        let ev = drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Move, 30, 25);
        assert_eq!(ev.iter().map(|e| e.event).collect::<Vec<_>>(), [BoxEvent::MoveStart]);
        assert_eq!(set.state_of(node), Some(StateId::Move));
        // The DRAG of the same sample reached the freshly registered Move listener.
        assert_eq!(tree.absolute_position(node), Position::new(20, 15));

        let ev = drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Up, 30, 25);
        assert_eq!(ev.iter().map(|e| e.event).collect::<Vec<_>>(), [BoxEvent::MoveEnd]);
        assert_eq!(set.state_of(node), Some(StateId::Hover));

        let ev = drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Move, 700, 500);
        assert_eq!(ev.iter().map(|e| e.event).collect::<Vec<_>>(), [BoxEvent::Out]);
        assert_eq!(set.state_of(node), Some(StateId::Normal));
        assert!(tree.overlay().children_of(tree.overlay_root()).is_empty());
    }

    #[test]
    fn detach_removes_listeners() {
        let mut tree = BoxTree::new(800, 600);
        let mut damage = Damage::default();
        let node = tree.add_node(BoxNode::new(10, 10, 100, 50, ""), Some(tree.content_root()));
        let mut set = Interactions::new("hoverborder");
        set.attach(node, &mut tree, &mut damage);
        set.transition(node, BoxEvent::In, &mut tree, &mut damage);
        assert!(set.detach(node, &mut tree, &mut damage));
        assert!(!set.detach(node, &mut tree, &mut damage));
        assert_eq!(set.listeners().len_for(node), 0);
        assert_eq!(set.state_of(node), None);
        assert!(tree.overlay().children_of(tree.overlay_root()).is_empty());
    }

    #[test]
    fn custom_select_state() {
        use crate::behavior::{Behavior, CustomBehavior, Reaction};

        let mut tree = BoxTree::new(800, 600);
        let mut damage = Damage::default();
        let node = tree.add_node(BoxNode::new(10, 10, 100, 50, ""), Some(tree.content_root()));
        let mut set = Interactions::new("hoverborder");
        let normal = Behavior::Custom(
            CustomBehavior::default().on(PointerEventKind::Click, Reaction::Emit(BoxEvent::Select)),
        );
        let selected = Behavior::Custom(CustomBehavior::default().with_border("selectborder"));
        set.attach_custom(
            node,
            [
                StateObject::new(StateId::Normal, normal, node, "hoverborder"),
                StateObject::new(StateId::Selected, selected, node, "hoverborder"),
            ],
            [(BoxEvent::Select, StateId::Selected)],
            &mut tree,
            &mut damage,
        );

        let mut pipeline = PointerPipeline::new();
        let ev = drive(&mut set, &mut pipeline, &mut tree, &mut damage, RawPointerKind::Click, 50, 30);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].event, BoxEvent::Select);
        assert_eq!(set.state_of(node), Some(StateId::Selected));
        let overlay = tree.overlay().children_of(tree.overlay_root())[0];
        assert_eq!(tree.overlay().get(overlay).unwrap().style_class, "selectborder");
    }
}
