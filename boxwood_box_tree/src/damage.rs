// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage: rectangles invalidated by tree mutations, waiting to be repainted.

use alloc::vec::Vec;

use crate::geom::Bounds;

/// A batch of absolute rectangles that need repainting.
///
/// Rectangles may overlap and are not deduplicated; [`Damage::union_rect`]
/// collapses them into the single dirty rectangle handed to the painter.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Absolute rectangles that should be repainted.
    pub dirty_rects: Vec<Bounds>,
}

impl Damage {
    /// Record a dirty rectangle. Zero-area rectangles are ignored.
    pub fn push(&mut self, bounds: Bounds) {
        if !bounds.is_empty() {
            self.dirty_rects.push(bounds);
        }
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Bounds> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Take the recorded rectangles, leaving this batch empty.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}
