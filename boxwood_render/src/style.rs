// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and border attributes looked up by style class.

use alloc::string::String;

use hashbrown::HashMap;
use peniko::Color;

/// Style class of the built-in hover border.
pub const HOVER_BORDER: &str = "hoverborder";

/// Paint attributes of a box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Interior fill.
    #[cfg_attr(feature = "serde", serde(with = "rgba8"))]
    pub background: Color,
    /// Skip the interior fill entirely.
    pub background_transparent: bool,
    /// Border ring color.
    #[cfg_attr(feature = "serde", serde(with = "rgba8"))]
    pub border: Color,
    /// Border ring width; `0` draws no border.
    pub border_weight: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(0, 0, 0, 0),
            background_transparent: true,
            border: Color::from_rgba8(0, 0, 0, 0),
            border_weight: 0,
        }
    }
}

impl Style {
    /// Opaque fill without a border.
    pub fn filled(background: Color) -> Self {
        Self {
            background,
            background_transparent: false,
            border: Color::from_rgba8(0, 0, 0, 0),
            border_weight: 0,
        }
    }

    /// Border ring only.
    pub fn outline(border: Color, border_weight: u32) -> Self {
        Self {
            background: border,
            background_transparent: true,
            border,
            border_weight,
        }
    }

    /// Deterministic fill color derived from a class name, for classes with no entry.
    pub fn generated(class: &str) -> Self {
        // FNV-1a
        let mut h: u32 = 0x811c_9dc5;
        for b in class.bytes() {
            h ^= u32::from(b);
            h = h.wrapping_mul(0x0100_0193);
        }
        let [r, g, b, _] = h.to_le_bytes();
        Self::filled(Color::from_rgba8(r, g, b, 255))
    }
}

/// Style lookup by class name.
///
/// Unknown and empty class names fall back to [`Style::generated`].
#[derive(Clone, Debug)]
pub struct StyleSheet {
    styles: HashMap<String, Style>,
}

impl Default for StyleSheet {
    /// A sheet holding only the hover border: blue, one unit wide, no fill.
    fn default() -> Self {
        let mut sheet = Self::empty();
        sheet.add(HOVER_BORDER, Style::outline(Color::from_rgba8(0, 0, 255, 255), 1));
        sheet
    }
}

impl StyleSheet {
    /// Create a sheet pre-seeded with the hover border.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet with no entries.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Add or replace the style for `class`.
    pub fn add(&mut self, class: impl Into<String>, style: Style) {
        self.styles.insert(class.into(), style);
    }

    /// Remove the style for `class`, returning it if present.
    pub fn remove(&mut self, class: &str) -> Option<Style> {
        self.styles.remove(class)
    }

    /// Returns `true` if `class` has an explicit entry.
    pub fn contains(&self, class: &str) -> bool {
        self.styles.contains_key(class)
    }

    /// Style for `class`, or the generated fallback.
    pub fn get(&self, class: &str) -> Style {
        if class.is_empty() {
            return Style::generated(class);
        }
        self.styles
            .get(class)
            .copied()
            .unwrap_or_else(|| Style::generated(class))
    }
}

#[cfg(feature = "serde")]
mod rgba8 {
    use peniko::Color;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a].serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let [r, g, b, a] = <[u8; 4]>::deserialize(d)?;
        Ok(Color::from_rgba8(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_border_is_seeded() {
        let sheet = StyleSheet::new();
        let s = sheet.get(HOVER_BORDER);
        assert!(s.background_transparent);
        assert_eq!(s.border_weight, 1);
        assert_eq!(s.border.to_rgba8().b, 255);
    }

    #[test]
    fn unknown_class_falls_back_deterministically() {
        let sheet = StyleSheet::new();
        assert!(!sheet.contains("card"));
        assert_eq!(sheet.get("card"), sheet.get("card"));
        assert_eq!(sheet.get("card"), Style::generated("card"));
        assert!(!sheet.get("").background_transparent);
        assert_eq!(sheet.get("card").background.to_rgba8().a, 255);
    }

    #[test]
    fn add_and_remove() {
        let mut sheet = StyleSheet::empty();
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        sheet.add("card", red);
        assert_eq!(sheet.get("card"), red);
        assert_eq!(sheet.remove("card"), Some(red));
        assert_eq!(sheet.remove("card"), None);
        assert_eq!(sheet.get("card"), Style::generated("card"));
    }
}
