// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry helpers: positions, bounds, rounding, and rotation about a pivot.
//!
//! Everything here is pure arithmetic. Rounding is implemented without `std` float
//! intrinsics so that the crate stays `no_std` without pulling in `libm` for it.

use kurbo::{Affine, Point, Rect};

/// Margin, in absolute units, added on every side of the bounds of a rotated box.
pub const BOUNDS_MARGIN: i32 = 2;

/// A point in integer coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn offset_by(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub const fn delta_from(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Convert to a kurbo point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// An axis-aligned rectangle in integer coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Bounds {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub const fn max_x(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub const fn max_y(&self) -> i32 {
        self.y + self.height
    }

    /// Returns `true` if the rectangle covers no area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.max_x().max(other.max_x()) - x,
            self.max_y().max(other.max_y()) - y,
        )
    }

    /// Overlapping part of `self` and `other`.
    ///
    /// Disjoint rectangles produce a zero-area result anchored at the clamped origin,
    /// never a negative size.
    #[must_use]
    pub fn intersect(&self, other: Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        Self::new(x, y, (max_x - x).max(0), (max_y - y).max(0))
    }

    /// Returns `true` if the rectangles share any area.
    pub fn intersects(&self, other: Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Center point, rounded.
    pub fn center(&self) -> Position {
        Position::new(
            round(f64::from(self.x) + f64::from(self.width) / 2.0),
            round(f64::from(self.y) + f64::from(self.height) / 2.0),
        )
    }

    /// Convert to a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.max_x()),
            f64::from(self.max_y()),
        )
    }
}

/// Round half away from zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Box geometry is integral; values are screen-sized."
)]
pub fn round(v: f64) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// Smallest integer not less than `v`, saturating at the `i32` range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Box geometry is integral; values are screen-sized."
)]
pub fn ceil(v: f64) -> i32 {
    let t = v as i32;
    if f64::from(t) < v { t.saturating_add(1) } else { t }
}

/// Rotate `point` about `pivot` by `angle` radians and round the result.
///
/// The pivot may be fractional (the center of an odd-sized box).
pub fn rotate_about(angle: f64, point: Position, pivot: Point) -> Position {
    let rotated = Affine::rotate_about(angle, pivot) * point.to_point();
    Position::new(round(rotated.x), round(rotated.y))
}

/// Smallest value in a non-empty slice; `0` for an empty one.
pub fn min_of(values: &[i32]) -> i32 {
    values.iter().copied().min().unwrap_or(0)
}

/// Largest value in a non-empty slice; `0` for an empty one.
pub fn max_of(values: &[i32]) -> i32 {
    values.iter().copied().max().unwrap_or(0)
}
