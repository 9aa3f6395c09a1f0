// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxwood Render: repaint a dirty region of a box tree.
//!
//! Painting happens in two steps:
//!
//! 1. [`DisplayList::capture`] walks the content forest and then the overlay forest in pre-order
//!    and copies every paintable box that intersects the dirty region, with its resolved
//!    [`Style`], into an owned list. Roots are never painted; unused and selected boxes are
//!    skipped along with their subtrees.
//! 2. [`Canvas::paint`] rasterizes that list with `vello_cpu` into an RGBA8 [`Frame`] covering
//!    the [`Viewport`]: the dirty region scaled by the zoom factor, every edge rounded up. Each
//!    box is drawn in its unrotated frame under a rotation about its center; viewports beyond
//!    [`MAX_FRAME_EXTENT`] are skipped.
//!
//! The frame is then handed to a [`DisplaySurface`].
//!
//! Because the display list owns its data, step 2 can run on another thread while the tree
//! keeps changing.
//!
//! ## Example
//!
//! ```rust
//! use boxwood_box_tree::{Bounds, BoxNode, BoxTree};
//! use boxwood_render::{Canvas, DisplayList, StyleSheet, Viewport};
//!
//! let mut tree = BoxTree::new(200, 200);
//! tree.add_node(BoxNode::new(10, 10, 50, 50, "card"), Some(tree.content_root()));
//!
//! let dirty = Bounds::new(0, 0, 100, 100);
//! let list = DisplayList::capture(&tree, &StyleSheet::new(), dirty);
//! let mut canvas = Canvas::new();
//! let frame = canvas.paint(&list, Viewport::from_dirty(dirty, 1.0));
//! assert_eq!(frame.pixel(20, 20).map(|p| p[3]), Some(255));
//! assert_eq!(frame.pixel(80, 80).map(|p| p[3]), Some(0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod canvas;
mod display_list;
mod style;

pub use canvas::{Canvas, DisplaySurface, Frame, MAX_FRAME_EXTENT, Viewport};
pub use display_list::{DisplayItem, DisplayList, Layer};
pub use style::{HOVER_BORDER, Style, StyleSheet};
