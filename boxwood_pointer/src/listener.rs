// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.
//!
//! A listener pairs a [`PointerEventKind`] with an action of the caller's choosing. The registry
//! stores actions as data rather than closures, so the code that runs them can borrow the tree
//! and the registry mutably while it does.

use alloc::vec::Vec;

use boxwood_box_tree::NodeId;
use hashbrown::HashMap;
use tracing::debug;

use crate::kind::PointerEventKind;

/// Handle to one registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// One registered listener.
#[derive(Clone, Debug)]
pub struct Listener<A> {
    /// Handle returned by [`ListenerRegistry::add`].
    pub id: ListenerId,
    /// Event kind this listener reacts to.
    pub kind: PointerEventKind,
    /// Caller-defined action.
    pub action: A,
}

/// Listeners grouped by node, kept in registration order.
#[derive(Clone, Debug)]
pub struct ListenerRegistry<A> {
    by_node: HashMap<NodeId, Vec<Listener<A>>>,
    next_id: u64,
}

impl<A> Default for ListenerRegistry<A> {
    fn default() -> Self {
        Self {
            by_node: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<A> ListenerRegistry<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `kind` events on `node`.
    pub fn add(&mut self, node: NodeId, kind: PointerEventKind, action: A) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_node
            .entry(node)
            .or_default()
            .push(Listener { id, kind, action });
        debug!(?node, %kind, ?id, "listener added");
        id
    }

    /// Remove one listener. Returns `false` if it was not registered on `node`.
    pub fn remove(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_node.remove(&node);
        }
        if removed {
            debug!(?node, ?id, "listener removed");
        }
        removed
    }

    /// Remove every listener registered on `node`.
    pub fn remove_all(&mut self, node: NodeId) {
        if let Some(list) = self.by_node.remove(&node) {
            debug!(?node, count = list.len(), "listeners cleared");
        }
    }

    /// Returns `true` if `id` is still registered on `node`.
    pub fn contains(&self, node: NodeId, id: ListenerId) -> bool {
        self.by_node
            .get(&node)
            .is_some_and(|list| list.iter().any(|l| l.id == id))
    }

    /// Listeners on `node` for `kind`, in registration order.
    pub fn matching(
        &self,
        node: NodeId,
        kind: PointerEventKind,
    ) -> impl Iterator<Item = &Listener<A>> + '_ {
        self.by_node
            .get(&node)
            .into_iter()
            .flatten()
            .filter(move |l| l.kind == kind)
    }

    /// Number of listeners registered on `node`.
    pub fn len_for(&self, node: NodeId) -> usize {
        self.by_node.get(&node).map_or(0, Vec::len)
    }

    /// Returns `true` if no listener is registered anywhere.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}
