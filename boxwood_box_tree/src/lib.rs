// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxwood Box Tree: the scene graph behind an interactive 2D box editor.
//!
//! A [`BoxTree`] owns two independent forests of rectangular, rotatable boxes:
//!
//! - the **content** forest, holding the boxes a user sees and manipulates, and
//! - the **overlay** forest, holding transient interaction decorations such as
//!   hover borders.
//!
//! Each forest is an arena ([`Forest`]) addressed by generational [`NodeId`]s. Index 0 of each
//! forest is its root, spans the viewport, and is never removed.
//!
//! ## Geometry
//!
//! Box geometry is integral and always relative to the parent box. The absolute position of a
//! box is the sum of the offsets along its parent chain ([`Forest::absolute_position`]).
//! [`Forest::bounds`] returns the axis-aligned [`Bounds`] of a box in absolute coordinates; for
//! rotated boxes this is the envelope of the four rotated corners, grown by
//! [`BOUNDS_MARGIN`] on every side to absorb rounding.
//!
//! Hit testing ([`Forest::hit_test`]) is open on all four edges: a point lying exactly on an
//! edge of a box is not inside it. This keeps precedence between abutting siblings
//! deterministic.
//!
//! ## Enable, disable, remove
//!
//! Content boxes are never deleted; [`BoxTree::disable_subtree`] clears the
//! [`NodeFlags::USED`] flag of a box and all of its descendants, which removes them from
//! painting while keeping their identifiers stable. Overlay boxes come and go freely through
//! [`BoxTree::add_overlay_node`], [`BoxTree::remove_overlay_node`], and
//! [`BoxTree::clear_overlay`].
//!
//! ## Example
//!
//! ```rust
//! use boxwood_box_tree::{BoxNode, BoxTree, Position};
//!
//! let mut tree = BoxTree::new(800, 600);
//! let root = tree.content_root();
//! let panel = tree.add_node(BoxNode::new(100, 100, 300, 200, "panel"), Some(root));
//! let button = tree.add_node(BoxNode::new(20, 30, 80, 24, "button"), Some(panel));
//!
//! assert_eq!(tree.absolute_position(button), Position::new(120, 130));
//! assert!(tree.hit_test(Position::new(150, 140), button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod forest;
pub mod geom;
mod tree;
mod types;

pub use damage::Damage;
pub use forest::Forest;
pub use geom::{BOUNDS_MARGIN, Bounds, Position};
pub use tree::BoxTree;
pub use types::{BoxNode, NodeFlags, NodeId};
