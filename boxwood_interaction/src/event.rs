// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abstract box events and interaction state identifiers.

use core::fmt;

/// A node-level semantic event emitted by an interaction state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoxEvent {
    /// Pointer entered the box.
    In,
    /// Pointer left the box.
    Out,
    /// Box was selected.
    Select,
    /// A move gesture started on the box.
    MoveStart,
    /// The move gesture ended.
    MoveEnd,
    /// Free stretch started.
    StretchStart,
    /// Horizontal stretch started.
    HStretchStart,
    /// Vertical stretch started.
    VStretchStart,
    /// Free stretch ended.
    StretchEnd,
    /// Horizontal stretch ended.
    HStretchEnd,
    /// Vertical stretch ended.
    VStretchEnd,
    /// Rotation started.
    RotateStart,
    /// Rotation ended.
    RotateEnd,
}

impl fmt::Display for BoxEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Select => "SELECT",
            Self::MoveStart => "MOVESTART",
            Self::MoveEnd => "MOVEEND",
            Self::StretchStart => "STRETCHSTART",
            Self::HStretchStart => "HSTRETCHSTART",
            Self::VStretchStart => "VSTRETCHSTART",
            Self::StretchEnd => "STRETCHEND",
            Self::HStretchEnd => "HSTRETCHEND",
            Self::VStretchEnd => "VSTRETCHEND",
            Self::RotateStart => "ROTATESTART",
            Self::RotateEnd => "ROTATEEND",
        };
        f.write_str(name)
    }
}

/// Identifier of an interaction state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateId {
    /// Idle.
    #[default]
    Normal,
    /// Pointer over the box.
    Hover,
    /// Box selected. Reserved.
    Selected,
    /// Box following the pointer.
    Move,
    /// Free stretch. Reserved.
    Stretch,
    /// Horizontal stretch. Reserved.
    HStretch,
    /// Vertical stretch. Reserved.
    VStretch,
    /// Rotation. Reserved.
    Rotate,
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Hover => "hover",
            Self::Selected => "selected",
            Self::Move => "move",
            Self::Stretch => "stretch",
            Self::HStretch => "hstretch",
            Self::VStretch => "vstretch",
            Self::Rotate => "rotate",
        };
        f.write_str(name)
    }
}

/// The default event → state table.
pub const DEFAULT_TRANSITIONS: [(BoxEvent, StateId); 4] = [
    (BoxEvent::In, StateId::Hover),
    (BoxEvent::Out, StateId::Normal),
    (BoxEvent::MoveStart, StateId::Move),
    (BoxEvent::MoveEnd, StateId::Hover),
];
