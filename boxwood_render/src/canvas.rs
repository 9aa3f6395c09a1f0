// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterization of a display list into an RGBA8 frame with `vello_cpu`.

use alloc::vec::Vec;

use boxwood_box_tree::geom::ceil;
use boxwood_box_tree::{Bounds, Position};
use kurbo::{Affine, Point};
use tracing::{trace, warn};
use vello_cpu::kurbo::{Affine as CpuAffine, Join, Rect, Stroke};
use vello_cpu::{Pixmap, RenderContext};

use crate::display_list::{DisplayItem, DisplayList};

/// Largest frame width or height the rasterizer accepts, in device pixels.
pub const MAX_FRAME_EXTENT: i32 = u16::MAX as i32;

/// Device-space region being repainted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge, in device pixels.
    pub x: i32,
    /// Top edge, in device pixels.
    pub y: i32,
    /// Width, in device pixels.
    pub width: i32,
    /// Height, in device pixels.
    pub height: i32,
    /// Device pixels per absolute unit.
    pub zoom: f64,
}

impl Viewport {
    /// Scale a dirty rectangle in absolute units by `zoom`, rounding every value up.
    pub fn from_dirty(dirty: Bounds, zoom: f64) -> Self {
        let scale = |v: i32| ceil(f64::from(v) * zoom);
        Self {
            x: scale(dirty.x),
            y: scale(dirty.y),
            width: scale(dirty.width).max(0),
            height: scale(dirty.height).max(0),
            zoom,
        }
    }

    /// Returns `true` if no pixel is covered.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A painted region, ready for presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Device-space origin of the region.
    pub origin: Position,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major, non-premultiplied RGBA8 pixels.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// RGBA of the pixel at frame-local `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Returns `true` if the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A surface that shows painted frames: a window, a texture upload, a test recorder.
pub trait DisplaySurface {
    /// Show `frame` at its origin.
    fn present(&mut self, frame: &Frame);
}

/// A reusable pixel buffer.
///
/// Each [`paint`](Self::paint) resizes the buffer to the viewport, clears it to transparent,
/// and paints the display list into it. The allocation is kept between paints.
#[derive(Debug, Default)]
pub struct Canvas {
    frame: Frame,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `list` into `viewport` and return the resulting frame.
    ///
    /// A viewport wider or taller than [`MAX_FRAME_EXTENT`] is skipped with a warning and
    /// yields an empty frame.
    pub fn paint(&mut self, list: &DisplayList, viewport: Viewport) -> &Frame {
        self.frame.origin = Position::new(viewport.x, viewport.y);
        self.frame.pixels.clear();
        let Some((width, height)) = device_size(viewport) else {
            self.frame.width = 0;
            self.frame.height = 0;
            return &self.frame;
        };

        let mut ctx = RenderContext::new(width, height);
        let to_device = Affine::translate((-f64::from(viewport.x), -f64::from(viewport.y)))
            * Affine::scale(viewport.zoom);
        for item in &list.items {
            paint_item(&mut ctx, item, to_device);
        }
        let mut pixmap = Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        self.frame.width = u32::from(width);
        self.frame.height = u32::from(height);
        let unpremul = pixmap.take_unpremultiplied();
        self.frame.pixels.reserve(unpremul.len() * 4);
        for p in unpremul {
            self.frame.pixels.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        trace!(
            x = viewport.x,
            y = viewport.y,
            width,
            height,
            items = list.items.len(),
            "canvas painted"
        );
        &self.frame
    }

    /// The most recently painted frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

fn device_size(viewport: Viewport) -> Option<(u16, u16)> {
    if viewport.is_empty() {
        return None;
    }
    match (u16::try_from(viewport.width), u16::try_from(viewport.height)) {
        (Ok(width), Ok(height)) => Some((width, height)),
        _ => {
            warn!(
                width = viewport.width,
                height = viewport.height,
                max = MAX_FRAME_EXTENT,
                "viewport too large to rasterize, skipping paint"
            );
            None
        }
    }
}

fn paint_item(ctx: &mut RenderContext, item: &DisplayItem, to_device: Affine) {
    let style = &item.style;
    if style.background_transparent && style.border_weight == 0 {
        return;
    }
    let r = item.rect;
    let rect = Rect::new(
        f64::from(r.x),
        f64::from(r.y),
        f64::from(r.max_x()),
        f64::from(r.max_y()),
    );
    let center = Point::new(
        f64::from(r.x) + f64::from(r.width) / 2.0,
        f64::from(r.y) + f64::from(r.height) / 2.0,
    );
    let xf = to_device * Affine::rotate_about(item.angle, center);
    ctx.set_transform(CpuAffine::new(xf.as_coeffs()));

    if !style.background_transparent {
        ctx.set_paint(style.background);
        ctx.fill_rect(&rect);
    }
    if style.border_weight > 0 {
        // The ring lies inside the rect, `border_weight` units deep.
        let weight = f64::from(style.border_weight);
        ctx.set_paint(style.border);
        if 2.0 * weight >= rect.width().min(rect.height()) {
            ctx.fill_rect(&rect);
        } else {
            ctx.set_stroke(Stroke::new(weight).with_join(Join::Miter));
            ctx.stroke_rect(&rect.inset(-weight / 2.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::Layer;
    use crate::style::Style;
    use boxwood_box_tree::NodeId;
    use core::f64::consts::FRAC_PI_4;
    use peniko::Color;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn item(rect: Bounds, angle: f64, style: Style) -> DisplayItem {
        DisplayItem {
            layer: Layer::Content,
            node: NodeId::ROOT,
            rect,
            angle,
            bounds: rect,
            style,
        }
    }

    fn paint(items: Vec<DisplayItem>, dirty: Bounds, zoom: f64) -> Frame {
        let mut canvas = Canvas::new();
        canvas
            .paint(&DisplayList { items }, Viewport::from_dirty(dirty, zoom))
            .clone()
    }

    /// Channel-wise comparison with room for rasterizer rounding.
    #[track_caller]
    fn assert_px(frame: &Frame, x: u32, y: u32, expected: [u8; 4]) {
        let got = frame.pixel(x, y).expect("pixel inside the frame");
        let close = got
            .iter()
            .zip(expected)
            .all(|(&g, e)| g.abs_diff(e) <= 2);
        assert!(close, "pixel ({x}, {y}) is {got:?}, expected {expected:?}");
    }

    #[test]
    fn viewport_rounds_up() {
        let vp = Viewport::from_dirty(Bounds::new(10, 11, 5, 7), 1.5);
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (15, 17, 8, 11));
    }

    #[test]
    fn fills_only_inside_viewport() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        let frame = paint(
            alloc::vec![item(Bounds::new(5, 5, 10, 10), 0.0, red)],
            Bounds::new(0, 0, 10, 10),
            1.0,
        );
        assert_eq!((frame.width, frame.height), (10, 10));
        assert_px(&frame, 4, 4, CLEAR);
        assert_px(&frame, 5, 5, RED);
        assert_px(&frame, 9, 9, RED);
        assert_eq!(frame.pixel(10, 0), None);
    }

    #[test]
    fn viewport_origin_offsets_the_frame() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        let frame = paint(
            alloc::vec![item(Bounds::new(5, 5, 10, 10), 0.0, red)],
            Bounds::new(10, 10, 10, 10),
            1.0,
        );
        assert_eq!(frame.origin, Position::new(10, 10));
        assert_px(&frame, 0, 0, RED);
        assert_px(&frame, 4, 4, RED);
        assert_px(&frame, 5, 5, CLEAR);
    }

    #[test]
    fn border_ring_over_fill() {
        let style = Style {
            border: Color::from_rgba8(0, 0, 255, 255),
            border_weight: 1,
            ..Style::filled(Color::from_rgba8(255, 0, 0, 255))
        };
        let frame = paint(
            alloc::vec![item(Bounds::new(0, 0, 10, 10), 0.0, style)],
            Bounds::new(0, 0, 10, 10),
            1.0,
        );
        assert_px(&frame, 0, 0, BLUE);
        assert_px(&frame, 9, 5, BLUE);
        assert_px(&frame, 1, 1, RED);
        assert_px(&frame, 5, 5, RED);
    }

    #[test]
    fn transparent_outline_leaves_interior() {
        let style = Style::outline(Color::from_rgba8(0, 0, 255, 255), 1);
        let frame = paint(
            alloc::vec![item(Bounds::new(0, 0, 10, 10), 0.0, style)],
            Bounds::new(0, 0, 10, 10),
            1.0,
        );
        assert_px(&frame, 0, 3, BLUE);
        assert_px(&frame, 5, 5, CLEAR);
    }

    #[test]
    fn heavy_border_covers_small_box() {
        let style = Style::outline(Color::from_rgba8(0, 0, 255, 255), 4);
        let frame = paint(
            alloc::vec![item(Bounds::new(0, 0, 6, 6), 0.0, style)],
            Bounds::new(0, 0, 8, 8),
            1.0,
        );
        assert_px(&frame, 3, 3, BLUE);
        assert_px(&frame, 7, 7, CLEAR);
    }

    #[test]
    fn rotated_fill_follows_shape() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        let mut it = item(Bounds::new(20, 20, 20, 20), FRAC_PI_4, red);
        it.bounds = Bounds::new(14, 14, 32, 32);
        let frame = paint(alloc::vec![it], Bounds::new(0, 0, 60, 60), 1.0);
        assert_px(&frame, 30, 30, RED);
        assert_px(&frame, 20, 20, CLEAR);
        assert_px(&frame, 30, 17, RED);
    }

    #[test]
    fn zoom_scales_device_pixels() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        let frame = paint(
            alloc::vec![item(Bounds::new(2, 2, 2, 2), 0.0, red)],
            Bounds::new(0, 0, 5, 5),
            2.0,
        );
        assert_eq!((frame.width, frame.height), (10, 10));
        assert_px(&frame, 4, 4, RED);
        assert_px(&frame, 7, 7, RED);
        assert_px(&frame, 8, 8, CLEAR);
        assert_px(&frame, 3, 3, CLEAR);
    }

    #[test]
    fn translucent_fill_blends_over() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        let blue = Style::filled(Color::from_rgba8(0, 0, 255, 128));
        let frame = paint(
            alloc::vec![
                item(Bounds::new(0, 0, 4, 4), 0.0, red),
                item(Bounds::new(0, 0, 4, 4), 0.0, blue),
            ],
            Bounds::new(0, 0, 4, 4),
            1.0,
        );
        let [r, g, b, a] = frame.pixel(1, 1).expect("pixel inside the frame");
        assert!((120..=135).contains(&r), "red channel {r}");
        assert_eq!(g, 0);
        assert!((120..=135).contains(&b), "blue channel {b}");
        assert_eq!(a, 255);
    }

    #[test]
    fn empty_viewport_yields_empty_frame() {
        let frame = paint(Vec::new(), Bounds::new(5, 5, 0, 3), 1.0);
        assert!(frame.is_empty());
        assert!(frame.pixels.is_empty());
    }

    #[test]
    fn oversized_viewport_is_skipped() {
        let red = Style::filled(Color::from_rgba8(255, 0, 0, 255));
        // 800 x 600 units at 100x zoom overflows any 32-bit pixel count.
        let frame = paint(
            alloc::vec![item(Bounds::new(10, 10, 100, 50), 0.0, red)],
            Bounds::new(0, 0, 800, 600),
            100.0,
        );
        assert!(frame.is_empty());
        assert!(frame.pixels.is_empty());
        assert_eq!(frame.pixel(0, 0), None);

        let mut canvas = Canvas::new();
        let list = DisplayList::default();
        let tall = Viewport {
            x: 0,
            y: 0,
            width: 4,
            height: MAX_FRAME_EXTENT + 1,
            zoom: 1.0,
        };
        assert!(canvas.paint(&list, tall).is_empty());
        let next = canvas.paint(&list, Viewport::from_dirty(Bounds::new(0, 0, 3, 2), 1.0));
        assert_eq!((next.width, next.height), (3, 2));
        assert_eq!(next.pixels.len(), 24);
    }
}
