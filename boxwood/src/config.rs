// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use boxwood_render::HOVER_BORDER;

use crate::error::{EngineError, EngineResult};

/// Where paint jobs run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaintMode {
    /// Paint synchronously on the dispatch thread.
    #[default]
    Inline,
    /// Paint on one worker thread, jobs strictly in submission order.
    Background,
}

/// Engine settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Viewport width in absolute units.
    pub viewport_width: i32,
    /// Viewport height in absolute units.
    pub viewport_height: i32,
    /// Device pixels per absolute unit.
    pub zoom: f64,
    /// Paint scheduling.
    pub paint_mode: PaintMode,
    /// Style class of the hover and move borders.
    pub hover_style: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800,
            viewport_height: 600,
            zoom: 1.0,
            paint_mode: PaintMode::Inline,
            hover_style: HOVER_BORDER.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Builder-style viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Builder-style zoom.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Builder-style paint mode.
    #[must_use]
    pub fn with_paint_mode(mut self, paint_mode: PaintMode) -> Self {
        self.paint_mode = paint_mode;
        self
    }

    /// Builder-style hover border class.
    #[must_use]
    pub fn with_hover_style(mut self, hover_style: impl Into<String>) -> Self {
        self.hover_style = hover_style.into();
        self
    }

    /// Check that the settings describe a usable engine.
    pub fn validate(&self) -> EngineResult<()> {
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(EngineError::InvalidConfig("viewport must have a positive size"));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(EngineError::InvalidConfig("zoom must be finite and positive"));
        }
        Ok(())
    }
}
