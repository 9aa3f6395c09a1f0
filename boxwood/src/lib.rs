// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxwood: an interactive 2D box editor engine.
//!
//! This crate ties the workspace together. An [`Engine`] owns:
//!
//! - a [`BoxTree`](box_tree::BoxTree) with a content forest and an overlay forest,
//! - a [`PointerPipeline`](pointer::PointerPipeline) that turns raw samples into bubbling,
//!   hover, and drag events,
//! - one [`BoxStateMachine`](interaction::BoxStateMachine) per interactive box,
//! - a [`StyleSheet`](render::StyleSheet) and a painter that repaints damaged regions.
//!
//! Hosts create boxes with [`Engine::create_node`], feed pointer input with
//! [`Engine::dispatch_pointer_sample`] or [`Engine::dispatch_raw_event`], and receive pixels
//! through their own [`DisplaySurface`](render::DisplaySurface). [`RecordingSurface`] keeps
//! every frame in memory, which is handy in tests.
//!
//! Painting runs inline by default. With [`PaintMode::Background`] it moves to one worker
//! thread; [`Engine::flush`] waits for it to catch up.
//!
//! The building blocks are re-exported as [`box_tree`], [`pointer`], [`interaction`], and
//! [`render`].
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`EngineConfig`] and render styles.

mod config;
mod engine;
mod error;
mod painter;
mod surface;

pub use boxwood_box_tree as box_tree;
pub use boxwood_interaction as interaction;
pub use boxwood_pointer as pointer;
pub use boxwood_render as render;

pub use config::{EngineConfig, PaintMode};
pub use engine::{Engine, SubscriptionId};
pub use error::{EngineError, EngineResult};
pub use surface::RecordingSurface;
