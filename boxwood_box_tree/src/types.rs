// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the box tree: node identifiers, flags, and local geometry.

use alloc::string::String;

use crate::geom::{Bounds, Position};

/// Identifier for a node in a [`Forest`](crate::Forest) (generational).
///
/// Identifiers are only meaningful for the forest that issued them. A content
/// identifier used against the overlay forest refers to whatever overlay node
/// occupies that slot, if any.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    /// Identifier of the root slot of every forest.
    pub const ROOT: Self = Self(0, 1);

    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this identifier.
    pub const fn index(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is enabled for traversal and painting.
        const USED     = 0b0000_0001;
        /// Node is selected; selected nodes are skipped by the normal paint pass.
        const SELECTED = 0b0000_0010;
        /// Last known result of the sibling overlap check.
        const CORRECT  = 0b0000_0100;
        /// Pointer events keep propagating past this node.
        const BUBBLES  = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::USED | Self::CORRECT | Self::BUBBLES
    }
}

/// A box: parent-relative position, size, rotation, style class, and flags.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxNode {
    /// Horizontal offset from the parent's origin.
    pub x: i32,
    /// Vertical offset from the parent's origin.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Rotation about the box center, in radians.
    pub angle: f64,
    /// Style class used to look up fill and border attributes.
    pub style_class: String,
    /// State flags.
    pub flags: NodeFlags,
}

impl Default for BoxNode {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            angle: 0.0,
            style_class: String::new(),
            flags: NodeFlags::default(),
        }
    }
}

impl BoxNode {
    /// Create an unrotated box with default flags.
    pub fn new(x: i32, y: i32, width: i32, height: i32, style_class: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            style_class: style_class.into(),
            ..Self::default()
        }
    }

    /// Builder-style rotation setter.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Builder-style flags setter.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Parent-relative position.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Parent-relative rectangle, ignoring rotation.
    pub fn local_bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Whether the node is enabled.
    pub fn is_used(&self) -> bool {
        self.flags.contains(NodeFlags::USED)
    }

    /// Whether the node is selected.
    pub fn is_selected(&self) -> bool {
        self.flags.contains(NodeFlags::SELECTED)
    }

    /// Whether the last overlap check found the node valid.
    pub fn is_correct(&self) -> bool {
        self.flags.contains(NodeFlags::CORRECT)
    }

    /// Whether pointer events propagate past this node.
    pub fn can_bubble(&self) -> bool {
        self.flags.contains(NodeFlags::BUBBLES)
    }
}
