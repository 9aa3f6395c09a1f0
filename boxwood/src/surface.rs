// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A display surface that records frames instead of showing them.

use std::sync::Arc;

use boxwood_render::{DisplaySurface, Frame};
use parking_lot::Mutex;

/// Keeps a copy of every presented frame.
///
/// Clones share the same record, so a host can keep one handle while the engine (or its paint
/// worker) owns the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// Returns `true` if nothing has been presented.
    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    /// Copy of every presented frame, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    /// Copy of the most recent frame.
    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().last().cloned()
    }

    /// Forget recorded frames.
    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn present(&mut self, frame: &Frame) {
        self.frames.lock().push(frame.clone());
    }
}
