// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed engine state handed to states while they start, stop, or react.

use boxwood_box_tree::{BoxTree, Damage, NodeId};
use boxwood_pointer::ListenerRegistry;

use crate::behavior::Reaction;
use crate::event::StateId;

/// Listener action registered by a running state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StateListener {
    /// Node whose machine owns the state.
    pub owner: NodeId,
    /// State that registered the listener; the reaction runs only while it is running.
    pub state: StateId,
    /// What to do.
    pub reaction: Reaction,
}

/// Mutable access to the tree, the listener registry, and pending damage.
#[derive(Debug)]
pub struct InteractionContext<'a> {
    /// The box tree.
    pub tree: &'a mut BoxTree,
    /// Listener registry shared by every machine.
    pub listeners: &'a mut ListenerRegistry<StateListener>,
    /// Damage accumulated for the next paint.
    pub damage: &'a mut Damage,
}
