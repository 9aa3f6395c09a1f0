// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxwood Pointer: route raw pointer samples through a box tree.
//!
//! The [`PointerPipeline`] turns each [`PointerSample`] into an ordered list of
//! [`PointerEvent`]s addressed to individual boxes:
//!
//! - enter/leave notifications when the deepest box under the pointer changes,
//! - drag gesture events from the [`DragState`] machine (`DRAGSTART`, `DRAG`, `DRAGEND`),
//! - the primitive event itself, delivered along the [bubbling chain](bubbling_chain) from the
//!   root down, halting after the first box whose `BUBBLES` flag is clear.
//!
//! Enter/leave and drag events always come before the primitive pass of the same sample.
//!
//! Listeners live in a [`ListenerRegistry`], keyed by node and event kind. The registry is
//! generic over the action type so a caller can store plain data and interpret it with full
//! mutable access to its own state. [`PointerPipeline::dispatch`] covers the simple case of
//! invoking a handler for each matching listener.
//!
//! ## Example
//!
//! ```rust
//! use boxwood_box_tree::{BoxNode, BoxTree};
//! use boxwood_pointer::{
//!     ListenerRegistry, PointerEventKind, PointerPipeline, PointerSample, RawPointerKind,
//! };
//!
//! let mut tree = BoxTree::new(800, 600);
//! let card = tree.add_node(BoxNode::new(10, 10, 100, 50, "card"), Some(tree.content_root()));
//!
//! let mut listeners = ListenerRegistry::new();
//! listeners.add(card, PointerEventKind::MouseEnter, "hovered");
//!
//! let mut pipeline = PointerPipeline::new();
//! let mut seen = Vec::new();
//! let sample = PointerSample::new(RawPointerKind::Move, 15, 15);
//! pipeline.dispatch(sample, &tree, &listeners, |_, _, action| seen.push(*action));
//! assert_eq!(seen, ["hovered"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod drag;
mod kind;
mod listener;
mod pipeline;

pub use drag::{DragPhase, DragState, DragStep};
pub use kind::{ParsePointerKindError, PointerEventKind, RawPointerKind};
pub use listener::{Listener, ListenerId, ListenerRegistry};
pub use pipeline::{BubblingChain, PointerEvent, PointerPipeline, PointerSample, bubbling_chain};
