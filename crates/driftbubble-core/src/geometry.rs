//! Clamping of the bubble against its movable bounds.
//!
//! Bounds are plain `Rect`s: `x0` is the left edge, `y0` the top, `x1` the
//! right and `y1` the bottom.

use kurbo::{Point, Rect, Size};

/// Check that every coordinate of a rect is finite.
pub fn rect_is_finite(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

/// Check that a size is finite and not negative.
pub fn size_is_valid(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
}

/// Clamp one axis: leading edge first, then trailing edge.
fn clamp_axis(start: f64, extent: f64, lo: f64, hi: f64) -> f64 {
    let mut start = start;
    if start < lo {
        start = lo;
    }
    if start + extent > hi {
        start = hi - extent;
    }
    start
}

/// Clamp an element's origin so the element lies inside `bounds`.
///
/// Each axis is handled independently. When the element is larger than the
/// bounds along an axis, the trailing edge wins. Degenerate input (a
/// non-finite origin, an invalid size or non-finite bounds) returns the origin
/// unchanged.
pub fn clamp_origin(origin: Point, size: Size, bounds: Rect) -> Point {
    if !origin.is_finite() || !size_is_valid(size) || !rect_is_finite(bounds) {
        return origin;
    }
    Point::new(
        clamp_axis(origin.x, size.width, bounds.x0, bounds.x1),
        clamp_axis(origin.y, size.height, bounds.y0, bounds.y1),
    )
}

/// Clamp a whole frame, keeping its size.
pub fn clamp_frame(frame: Rect, bounds: Rect) -> Rect {
    let origin = clamp_origin(frame.origin(), frame.size(), bounds);
    frame.with_origin(origin)
}

/// Clamp a center point for an element of the given size.
pub fn clamp_center(center: Point, size: Size, bounds: Rect) -> Point {
    let half = size.to_vec2() / 2.0;
    clamp_origin(center - half, size, bounds) + half
}

/// Derive the region the closed bubble may occupy from the host safe area.
pub fn movable_bounds(safe_area: Rect, margin: f64) -> Rect {
    let bounds = safe_area.inset(-margin);
    if bounds.width() < 0.0 || bounds.height() < 0.0 {
        return safe_area;
    }
    bounds
}

/// Shrink a rect by separate horizontal and vertical padding.
///
/// Falls back to `rect` when the padding would leave nothing.
pub fn inset_by(rect: Rect, padding_x: f64, padding_y: f64) -> Rect {
    let inset = Rect::new(
        rect.x0 + padding_x,
        rect.y0 + padding_y,
        rect.x1 - padding_x,
        rect.y1 - padding_y,
    );
    if inset.width() <= 0.0 || inset.height() <= 0.0 {
        return rect;
    }
    inset
}
