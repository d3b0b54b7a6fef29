//! Geometry between the fixed real page and the on-screen viewport.
//!
//! Real space is the 2480×3508 page the server renders at; screen space is
//! CSS pixels inside the host container. The two are related by a single
//! uniform scale with no pan: the host centers the fitted page itself.
//!
//! Real-space outputs are integers. Screen-space values stay fractional and
//! are rounded exactly once, in [`to_real`], so repeated drags do not drift.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{FIT_MARGIN, FONT_MAX, FONT_MIN, NUDGE_COARSE, NUDGE_FINE, REAL_H, REAL_W, ROTATE_STEP, ROTATE_STEP_FINE};
use crate::slot::{Slot, normalize_rotation};

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Cardinal direction for keyboard nudges. Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Scale that fits the whole page inside a `width × height` container with a 5% margin.
///
/// Returns `None` while the container has no usable size (zero, negative, or
/// non-finite), in which case the previous scale should be kept.
#[must_use]
pub fn fit_scale(width: f64, height: f64) -> Option<f64> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }
    let sx = width / f64::from(REAL_W);
    let sy = height / f64::from(REAL_H);
    Some(sx.min(sy) * FIT_MARGIN)
}

/// Convert a real coordinate to screen pixels.
#[must_use]
pub fn to_screen(real: i32, scale: f64) -> f64 {
    f64::from(real) * scale
}

/// Convert a screen coordinate back to real units, rounding to the nearest unit.
///
/// A non-positive or non-finite scale maps everything to 0.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn to_real(screen: f64, scale: f64) -> i32 {
    if !scale.is_finite() || scale <= 0.0 {
        return 0;
    }
    (screen / scale).round() as i32
}

/// Screen position of a real-space point.
#[must_use]
pub fn point_to_screen(x: i32, y: i32, scale: f64) -> Point {
    Point::new(to_screen(x, scale), to_screen(y, scale))
}

/// Real-space `(x, y)` of a screen point.
#[must_use]
pub fn point_to_real(screen: Point, scale: f64) -> (i32, i32) {
    (to_real(screen.x, scale), to_real(screen.y, scale))
}

/// Screen position of a slot's center.
#[must_use]
pub fn slot_center_screen(slot: &Slot, scale: f64) -> Point {
    point_to_screen(slot.x, slot.y, scale)
}

/// Screen size `(width, height)` of a slot's bounding box.
#[must_use]
pub fn slot_box_screen(slot: &Slot, scale: f64) -> (f64, f64) {
    (to_screen(slot.max_width, scale), to_screen(slot.max_height, scale))
}

/// On-screen font size in pixels. Matches the server renderer with no extra factor.
#[must_use]
pub fn screen_font_px(slot: &Slot, scale: f64) -> f64 {
    to_screen(slot.max_font_size, scale)
}

/// Screen size `(width, height)` of the whole page.
#[must_use]
pub fn page_size_screen(scale: f64) -> (f64, f64) {
    (to_screen(REAL_W, scale), to_screen(REAL_H, scale))
}

/// Whether the slot's center lies outside the page.
#[must_use]
pub fn is_out_of_bounds(slot: &Slot) -> bool {
    slot.x < 0 || slot.x > REAL_W || slot.y < 0 || slot.y > REAL_H
}

/// Font size after dragging a corner handle from `start` to `current`.
///
/// Scales `initial_font` by the ratio of pointer distances from the slot
/// center, so every corner behaves the same. The result is clamped to
/// `[FONT_MIN, FONT_MAX]`; a zero starting distance leaves the size unchanged.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn resize_by_corner(center: Point, initial_font: i32, start: Point, current: Point) -> i32 {
    let d0 = center.distance(start);
    let d1 = center.distance(current);
    let ratio = d1 / d0;
    if d0 <= f64::EPSILON || !ratio.is_finite() {
        return initial_font.clamp(FONT_MIN, FONT_MAX);
    }
    let scaled = (f64::from(initial_font) * ratio).round();
    (scaled.clamp(f64::from(FONT_MIN), f64::from(FONT_MAX))) as i32
}

/// Rotation in whole degrees pointing from `center` toward `pointer`.
///
/// Zero is straight up and angles grow clockwise, matching CSS `rotate()`.
/// Always within `[0, 360)`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn rotate_by_pointer(center: Point, pointer: Point) -> i32 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let degrees = dy.atan2(dx).to_degrees();
    if !degrees.is_finite() {
        return 0;
    }
    let angle = (degrees + 90.0 + 360.0).rem_euclid(360.0);
    normalize_rotation(angle.round() as i32)
}

/// Slot position after one keyboard nudge: 1 unit, or 10 with `coarse`.
#[must_use]
pub fn step_nudge(slot: &Slot, direction: Direction, coarse: bool) -> (i32, i32) {
    let step = if coarse { NUDGE_COARSE } else { NUDGE_FINE };
    match direction {
        Direction::Up => (slot.x, slot.y.saturating_sub(step)),
        Direction::Down => (slot.x, slot.y.saturating_add(step)),
        Direction::Left => (slot.x.saturating_sub(step), slot.y),
        Direction::Right => (slot.x.saturating_add(step), slot.y),
    }
}

/// Font size after a toolbar grow/shrink step, floored at `FONT_MIN`.
#[must_use]
pub fn step_font_size(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).max(FONT_MIN)
}

/// Rotation after a toolbar rotate click: +90°, or +15° with `fine`.
#[must_use]
pub fn step_rotation(current: i32, fine: bool) -> i32 {
    let step = if fine { ROTATE_STEP_FINE } else { ROTATE_STEP };
    normalize_rotation(current + step)
}
