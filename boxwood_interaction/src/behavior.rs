// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What each state does while it runs: which pointer events it listens to and how it reacts.

use alloc::string::String;
use alloc::vec::Vec;

use boxwood_pointer::PointerEventKind;

use crate::event::BoxEvent;

/// Reaction to a pointer event delivered to a state's listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Emit an abstract event to the owning machine.
    Emit(BoxEvent),
    /// Reposition the box under the pointer, keeping the drag offset, and repaint.
    FollowPointer,
}

const NORMAL: &[(PointerEventKind, Reaction)] =
    &[(PointerEventKind::MouseEnter, Reaction::Emit(BoxEvent::In))];

const HOVER: &[(PointerEventKind, Reaction)] = &[
    (PointerEventKind::DragStart, Reaction::Emit(BoxEvent::MoveStart)),
    (PointerEventKind::MouseLeave, Reaction::Emit(BoxEvent::Out)),
];

const MOVE: &[(PointerEventKind, Reaction)] = &[
    (PointerEventKind::Drag, Reaction::FollowPointer),
    (PointerEventKind::DragEnd, Reaction::Emit(BoxEvent::MoveEnd)),
];

/// A state described as data: listener reactions plus overlay styles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomBehavior {
    /// Listeners registered while the state runs, in registration order.
    pub reactions: Vec<(PointerEventKind, Reaction)>,
    /// One border overlay per entry, drawn with the named style class.
    pub overlay_styles: Vec<String>,
}

impl CustomBehavior {
    /// Builder-style reaction.
    #[must_use]
    pub fn on(mut self, kind: PointerEventKind, reaction: Reaction) -> Self {
        self.reactions.push((kind, reaction));
        self
    }

    /// Builder-style overlay border.
    #[must_use]
    pub fn with_border(mut self, style_class: impl Into<String>) -> Self {
        self.overlay_styles.push(style_class.into());
        self
    }
}

/// Behavior of an interaction state.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    /// No overlay; `MOUSEENTER` emits `IN`.
    Normal,
    /// Hover border; `DRAGSTART` emits `MOVESTART`, `MOUSELEAVE` emits `OUT`.
    Hover,
    /// Hover border; `DRAG` follows the pointer, `DRAGEND` emits `MOVEEND`.
    Move,
    /// Anything else, described as data.
    Custom(CustomBehavior),
}

impl Behavior {
    /// Listener reactions, in registration order.
    pub fn reactions(&self) -> &[(PointerEventKind, Reaction)] {
        match self {
            Self::Normal => NORMAL,
            Self::Hover => HOVER,
            Self::Move => MOVE,
            Self::Custom(custom) => &custom.reactions,
        }
    }

    /// Style classes of the border overlays this state draws.
    ///
    /// The built-in hover and move states draw a single border in `hover_style`.
    pub fn overlay_styles<'a>(&'a self, hover_style: &'a str) -> Vec<&'a str> {
        match self {
            Self::Normal => Vec::new(),
            Self::Hover | Self::Move => alloc::vec![hover_style],
            Self::Custom(custom) => custom.overlay_styles.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables() {
        assert_eq!(
            Behavior::Normal.reactions(),
            &[(PointerEventKind::MouseEnter, Reaction::Emit(BoxEvent::In))]
        );
        assert_eq!(Behavior::Hover.reactions().len(), 2);
        assert!(Behavior::Normal.overlay_styles("hoverborder").is_empty());
        assert_eq!(Behavior::Move.overlay_styles("hoverborder"), ["hoverborder"]);
    }

    #[test]
    fn custom_is_data() {
        let select = CustomBehavior::default()
            .on(PointerEventKind::MouseUp, Reaction::Emit(BoxEvent::Select))
            .with_border("selectborder");
        let behavior = Behavior::Custom(select);
        assert_eq!(behavior.reactions().len(), 1);
        assert_eq!(behavior.overlay_styles("hoverborder"), ["selectborder"]);
    }
}
