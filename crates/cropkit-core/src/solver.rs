//! Constraint solver for crop rectangle edits.
//!
//! Every function here is pure: it takes the rectangle captured at gesture
//! start plus the cumulative pointer delta and returns the admissible
//! rectangle. Results always satisfy, in container space:
//!
//! - `x >= 0`, `y >= 0`, `x + width <= bounds.width`, `y + height <= bounds.height`
//! - `width >= min_size` and `height >= min_size` whenever the bounds leave room
//! - `width / height == r` when an aspect ratio `r` is locked
//!
//! # Locked Resize
//!
//! With a locked ratio the corner opposite the dragged grip is the anchor.
//! `e` and `s` grow towards the bottom-right like `se`; `n` and `w` grow
//! towards the top-left like `nw`. Corners and `e`/`w` are width-driven from
//! `dx`; `n`/`s` are height-driven from `dy`. The other side is always
//! derived from the ratio, and the size is capped by the space available
//! from the anchor, so hitting a boundary shrinks the rectangle instead of
//! breaking the ratio.

use crate::aspect::AspectConstraint;
use crate::config::EditorConfig;
use crate::geometry::{CropRect, Point, Size};
use crate::handle::{HEdge, Handle, VEdge};

/// Limits a solved rectangle must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Container size; the rectangle must stay inside `[0, w] x [0, h]`.
    pub bounds: Size,
    /// Smallest width or height.
    pub min_size: f64,
    pub aspect: AspectConstraint,
}

impl Constraints {
    pub fn new(bounds: Size, min_size: f64, aspect: AspectConstraint) -> Self {
        Self {
            bounds,
            min_size,
            aspect,
        }
    }
}

/// Compute the rectangle for a drag of `handle` by `delta` from `start`.
///
/// Non-finite deltas are treated as zero so a bad pointer sample can never
/// produce a NaN rectangle.
pub fn solve(handle: Handle, start: &CropRect, delta: Point, c: &Constraints) -> CropRect {
    let dx = finite_or_zero(delta.x);
    let dy = finite_or_zero(delta.y);

    match (handle, c.aspect) {
        (Handle::Move, _) => translate(start, dx, dy, c.bounds),
        (_, AspectConstraint::Free) => resize_free(handle, start, dx, dy, c),
        (_, AspectConstraint::Locked(ratio)) => resize_locked(handle, start, dx, dy, ratio, c),
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Next representable value below a positive finite `v`.
#[inline]
fn step_down(v: f64) -> f64 {
    f64::from_bits(v.to_bits() - 1)
}

/// Largest length up to `len` with `origin + len <= limit` in floating point.
///
/// `origin + (limit - origin)` can round one ulp past `limit`; this trims
/// that overshoot off the length and leaves the origin where it is.
fn fit_extent(origin: f64, len: f64, limit: f64) -> f64 {
    let mut len = len.min(limit - origin);
    while len > 0.0 && origin + len > limit {
        let over = (origin + len) - limit;
        len = (len - over).min(step_down(len));
    }
    len.max(0.0)
}

/// Origin clamped into `[0, limit - len]` so that `origin + len <= limit`
/// holds in floating point. Keeps the length.
fn fit_origin(origin: f64, len: f64, limit: f64) -> f64 {
    let mut origin = origin.min(limit - len).max(0.0);
    while origin > 0.0 && origin + len > limit {
        let over = (origin + len) - limit;
        origin = (origin - over).min(step_down(origin)).max(0.0);
    }
    origin
}

/// Move without resizing, clamping each axis independently.
pub fn translate(start: &CropRect, dx: f64, dy: f64, bounds: Size) -> CropRect {
    let x = fit_origin(start.x + dx, start.width, bounds.width);
    let y = fit_origin(start.y + dy, start.height, bounds.height);
    CropRect::new(x, y, start.width, start.height)
}

/// Resize each axis independently; the opposite edge stays fixed.
pub fn resize_free(handle: Handle, start: &CropRect, dx: f64, dy: f64, c: &Constraints) -> CropRect {
    let min = c.min_size;
    let mut out = *start;

    match handle.h_edge() {
        Some(HEdge::Left) => {
            out.x = (start.x + dx).min(start.right() - min).max(0.0);
            out.width = start.right() - out.x;
        }
        Some(HEdge::Right) => {
            out.width = (start.width + dx).max(min);
        }
        None => {}
    }

    match handle.v_edge() {
        Some(VEdge::Top) => {
            out.y = (start.y + dy).min(start.bottom() - min).max(0.0);
            out.height = start.bottom() - out.y;
        }
        Some(VEdge::Bottom) => {
            out.height = (start.height + dy).max(min);
        }
        None => {}
    }

    out.width = fit_extent(out.x, out.width, c.bounds.width);
    out.height = fit_extent(out.y, out.height, c.bounds.height);
    out
}

/// Direction a locked resize grows along each axis: `1.0` towards
/// right/bottom, `-1.0` towards left/top.
fn growth(handle: Handle) -> (f64, f64) {
    let sx = match (handle.h_edge(), handle.v_edge()) {
        (Some(HEdge::Right), _) | (None, Some(VEdge::Bottom)) => 1.0,
        _ => -1.0,
    };
    let sy = match (handle.v_edge(), handle.h_edge()) {
        (Some(VEdge::Bottom), _) | (None, Some(HEdge::Right)) => 1.0,
        _ => -1.0,
    };
    (sx, sy)
}

/// Resize with a locked `ratio` around the anchor opposite `handle`.
pub fn resize_locked(
    handle: Handle,
    start: &CropRect,
    dx: f64,
    dy: f64,
    ratio: f64,
    c: &Constraints,
) -> CropRect {
    if handle.is_move() {
        return translate(start, dx, dy, c.bounds);
    }

    let (sx, sy) = growth(handle);
    let anchor_x = if sx > 0.0 { start.x } else { start.right() };
    let anchor_y = if sy > 0.0 { start.y } else { start.bottom() };

    let requested = if handle.h_edge().is_some() {
        start.width + sx * dx
    } else {
        (start.height + sy * dy) * ratio
    };

    // Floor the width so the derived height clears min_size as well.
    let min_width = c.min_size.max(c.min_size * ratio);

    let room_x = if sx > 0.0 { c.bounds.width - anchor_x } else { anchor_x };
    let room_y = if sy > 0.0 { c.bounds.height - anchor_y } else { anchor_y };
    let max_width = room_x.min(room_y * ratio).max(0.0);

    let width = requested.max(min_width).min(max_width);
    let height = width / ratio;

    // max(0) only absorbs rounding from the derived side
    let x = if sx > 0.0 { anchor_x } else { (anchor_x - width).max(0.0) };
    let y = if sy > 0.0 { anchor_y } else { (anchor_y - height).max(0.0) };

    // Derived sides can land one ulp past the container; trim, keep the anchor.
    CropRect::new(
        x,
        y,
        fit_extent(x, width, c.bounds.width),
        fit_extent(y, height, c.bounds.height),
    )
}

/// Reshape `rect` to `ratio`, keeping its center.
///
/// The new size fits inside the current footprint (the longer side is cut),
/// is raised to the minimum size, then reduced to `container - margin` on
/// any side that overflows the container. The position is clamped last.
pub fn fit_to_ratio(
    rect: &CropRect,
    ratio: f64,
    bounds: Size,
    min_size: f64,
    margin: f64,
) -> CropRect {
    let center = rect.center();

    let (mut width, mut height) = if rect.aspect() > ratio {
        (rect.height * ratio, rect.height)
    } else {
        (rect.width, rect.width / ratio)
    };

    let min_width = min_size.max(min_size * ratio);
    if width < min_width {
        width = min_width;
        height = width / ratio;
    }

    if width > bounds.width {
        width = shrink_side(bounds.width, margin);
        height = width / ratio;
    }
    if height > bounds.height {
        height = shrink_side(bounds.height, margin);
        width = height * ratio;
    }

    let x = fit_origin(center.x - width / 2.0, width, bounds.width);
    let y = fit_origin(center.y - height / 2.0, height, bounds.height);

    CropRect::new(
        x,
        y,
        fit_extent(x, width, bounds.width),
        fit_extent(y, height, bounds.height),
    )
}

fn shrink_side(side: f64, margin: f64) -> f64 {
    if side - margin > 0.0 {
        side - margin
    } else {
        side
    }
}

/// Default rectangle when an image is first shown.
///
/// Pads the container by `min(max_padding, fraction * w, fraction * h)`.
/// Returns `None` for degenerate bounds, or when the padding leaves no
/// positive area, so the overlay stays hidden.
pub fn initial_rect(bounds: Size, config: &EditorConfig) -> Option<CropRect> {
    if !bounds.is_valid() {
        return None;
    }

    let padding = config
        .max_padding
        .min(bounds.width * config.padding_fraction)
        .min(bounds.height * config.padding_fraction);

    if !padding.is_finite() || padding < 0.0 {
        return None;
    }

    let width = fit_extent(
        padding,
        (bounds.width - padding * 2.0).max(config.min_initial_size),
        bounds.width,
    );
    let height = fit_extent(
        padding,
        (bounds.height - padding * 2.0).max(config.min_initial_size),
        bounds.height,
    );
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    Some(CropRect::new(padding, padding, width, height))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
