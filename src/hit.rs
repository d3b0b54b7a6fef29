//! Hit-testing of screen points against slot boxes and their handles.
//!
//! Slots are boxes centered on `(x, y)` and rotated clockwise about that
//! center. A point is tested by rotating it back into the slot's unrotated
//! frame, so rotated boxes hit exactly where they are drawn.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::slot::{Slot, SlotId};
use crate::store::Selection;
use crate::transform::{Point, slot_box_screen, slot_center_screen};

/// Which part of a slot was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
    RotateHandle,
}

/// Corner of the slot box carrying a resize handle, named before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];

    /// Unit offsets from the box center, in half-widths and half-heights.
    fn sign(self) -> (f64, f64) {
        match self {
            Self::Nw => (-1.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::Se => (1.0, 1.0),
            Self::Sw => (-1.0, 1.0),
        }
    }

    /// CSS cursor shown while this corner is dragged on an unrotated box.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub slot_id: SlotId,
    pub part: HitPart,
}

/// Screen-space box of a slot: center, size, and clockwise rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: i32,
}

impl ScreenBox {
    /// The on-screen box of `slot` at `scale`.
    #[must_use]
    pub fn of_slot(slot: &Slot, scale: f64) -> Self {
        let (width, height) = slot_box_screen(slot, scale);
        Self { center: slot_center_screen(slot, scale), width, height, rotation: slot.rotation }
    }

    /// Rotate a point from the box's local frame (origin at center) to screen space.
    fn local_to_screen(&self, lx: f64, ly: f64) -> Point {
        let (sin, cos) = f64::from(self.rotation).to_radians().sin_cos();
        Point::new(self.center.x + lx * cos - ly * sin, self.center.y + lx * sin + ly * cos)
    }

    /// Rotate a screen point into the box's local frame.
    fn screen_to_local(&self, p: Point) -> (f64, f64) {
        let (sin, cos) = f64::from(self.rotation).to_radians().sin_cos();
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        (dx * cos + dy * sin, -dx * sin + dy * cos)
    }

    /// Whether `p` lies inside the rotated box, edges included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let (lx, ly) = self.screen_to_local(p);
        lx.abs() <= self.width / 2.0 && ly.abs() <= self.height / 2.0
    }

    /// Screen centers of the four resize handles and the rotate handle.
    #[must_use]
    pub fn handles(&self) -> [(HitPart, Point); 5] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let corner = |c: Corner| {
            let (sx, sy) = c.sign();
            (HitPart::ResizeHandle(c), self.local_to_screen(sx * hw, sy * hh))
        };
        [
            (HitPart::RotateHandle, self.local_to_screen(0.0, -hh - ROTATE_HANDLE_OFFSET_PX)),
            corner(Corner::Nw),
            corner(Corner::Ne),
            corner(Corner::Se),
            corner(Corner::Sw),
        ]
    }

    /// The handle under `p`, if any.
    #[must_use]
    pub fn handle_at(&self, p: Point) -> Option<HitPart> {
        self.handles()
            .into_iter()
            .find(|(_, center)| center.distance(p) <= HANDLE_RADIUS_PX)
            .map(|(part, _)| part)
    }
}

/// Test which slot (if any) is under `screen_pt`.
///
/// With `handles` enabled, the handles of selected slots are checked first.
/// Bodies follow: selected slots in selection order, then every slot from the
/// end of the list, so later slots win where boxes overlap.
#[must_use]
pub fn hit_test(screen_pt: Point, slots: &[Slot], selection: &Selection, scale: f64, handles: bool) -> Option<Hit> {
    let selected = || selection.ids().iter().filter_map(|id| slots.iter().find(|s| s.id == *id));

    if handles {
        for slot in selected() {
            if let Some(part) = ScreenBox::of_slot(slot, scale).handle_at(screen_pt) {
                return Some(Hit { slot_id: slot.id, part });
            }
        }
    }

    selected()
        .chain(slots.iter().rev())
        .find(|slot| ScreenBox::of_slot(slot, scale).contains(screen_pt))
        .map(|slot| Hit { slot_id: slot.id, part: HitPart::Body })
}
