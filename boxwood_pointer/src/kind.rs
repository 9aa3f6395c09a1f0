// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer kinds from the host and the event kinds delivered to listeners.

use core::fmt;
use core::str::FromStr;

/// Kind of a raw pointer sample delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawPointerKind {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Pointer moved.
    Move,
    /// Host-recognized click.
    Click,
    /// Host-recognized double click.
    DoubleClick,
}

impl RawPointerKind {
    /// The event kind delivered along the bubbling chain for this sample.
    pub const fn primitive(self) -> PointerEventKind {
        match self {
            Self::Down => PointerEventKind::MouseDown,
            Self::Up => PointerEventKind::MouseUp,
            Self::Move => PointerEventKind::MouseMove,
            Self::Click => PointerEventKind::Click,
            Self::DoubleClick => PointerEventKind::DoubleClick,
        }
    }
}

/// Error returned when a host event name is not a known pointer kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown pointer event name `{name}`")]
pub struct ParsePointerKindError {
    name: alloc::string::String,
}

impl ParsePointerKindError {
    /// The rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RawPointerKind {
    type Err = ParsePointerKindError;

    /// Accepts both DOM-style (`mousedown`) and short (`down`) names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mousedown" | "down" => Ok(Self::Down),
            "mouseup" | "up" => Ok(Self::Up),
            "mousemove" | "move" => Ok(Self::Move),
            "click" => Ok(Self::Click),
            "dblclick" | "doubleclick" => Ok(Self::DoubleClick),
            _ => Err(ParsePointerKindError { name: s.into() }),
        }
    }
}

/// Kind of an event delivered to a node's listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Primitive: button pressed.
    MouseDown,
    /// Primitive: button released.
    MouseUp,
    /// Primitive: pointer moved.
    MouseMove,
    /// Primitive: click.
    Click,
    /// Primitive: double click.
    DoubleClick,
    /// The node became the deepest hit node.
    MouseEnter,
    /// The node stopped being the deepest hit node.
    MouseLeave,
    /// First move after a press on the node.
    DragStart,
    /// Move while dragging the node.
    Drag,
    /// Release after dragging the node.
    DragEnd,
}

impl PointerEventKind {
    /// Returns `true` for the drag gesture kinds.
    pub const fn is_drag(self) -> bool {
        matches!(self, Self::DragStart | Self::Drag | Self::DragEnd)
    }
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MouseDown => "MOUSEDOWN",
            Self::MouseUp => "MOUSEUP",
            Self::MouseMove => "MOUSEMOVE",
            Self::Click => "CLICK",
            Self::DoubleClick => "DBLCLICK",
            Self::MouseEnter => "MOUSEENTER",
            Self::MouseLeave => "MOUSELEAVE",
            Self::DragStart => "DRAGSTART",
            Self::Drag => "DRAG",
            Self::DragEnd => "DRAGEND",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_names() {
        assert_eq!("mousedown".parse(), Ok(RawPointerKind::Down));
        assert_eq!("move".parse(), Ok(RawPointerKind::Move));
        assert_eq!("dblclick".parse(), Ok(RawPointerKind::DoubleClick));
        assert_eq!("doubleclick".parse(), Ok(RawPointerKind::DoubleClick));

        let err = "wheel".parse::<RawPointerKind>().unwrap_err();
        assert_eq!(err.name(), "wheel");
    }

    #[test]
    fn primitive_mapping() {
        assert_eq!(RawPointerKind::Up.primitive(), PointerEventKind::MouseUp);
        assert_eq!(RawPointerKind::Click.primitive(), PointerEventKind::Click);
        assert!(!RawPointerKind::Move.primitive().is_drag());
    }
}
