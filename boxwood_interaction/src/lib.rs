// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxwood Interaction: per-box state machines driven by routed pointer events.
//!
//! Each interactive box gets a [`BoxStateMachine`]. The machine owns one [`StateObject`] per
//! [`StateId`] and an event → state table. Exactly one state is current at a time; starting a
//! state renders its overlay views and registers its pointer listeners, stopping it does the
//! reverse. Listeners therefore exist exactly while their state is current, and every listener
//! is additionally gated on its state's running flag when it is delivered.
//!
//! States are a tagged [`Behavior`] rather than trait objects:
//!
//! | State  | Overlay      | Listens to                                  |
//! |--------|--------------|---------------------------------------------|
//! | Normal | none         | `MOUSEENTER` → `IN`                         |
//! | Hover  | hover border | `DRAGSTART` → `MOVESTART`, `MOUSELEAVE` → `OUT` |
//! | Move   | hover border | `DRAG` → follow pointer, `DRAGEND` → `MOVEEND` |
//!
//! The default table is [`DEFAULT_TRANSITIONS`]: `IN → Hover`, `OUT → Normal`,
//! `MOVESTART → Move`, `MOVEEND → Hover`. Further states (selection, stretch, rotation) plug in
//! through [`Behavior::Custom`] without touching the machine.
//!
//! States never hold references into the tree. Everything they mutate is passed in through an
//! [`InteractionContext`]. [`Interactions`] keeps every machine together with the shared
//! listener registry and delivers routed [`PointerEvent`](boxwood_pointer::PointerEvent)s to
//! them one at a time.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod behavior;
mod context;
mod event;
mod machine;
mod set;
mod state;
mod view;

pub use behavior::{Behavior, CustomBehavior, Reaction};
pub use context::{InteractionContext, StateListener};
pub use event::{BoxEvent, DEFAULT_TRANSITIONS, StateId};
pub use machine::{BoxStateMachine, Emitted, Transition};
pub use set::Interactions;
pub use state::StateObject;
pub use view::BorderView;
