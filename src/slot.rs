//! Slot model: positionable text elements, sparse patches, and the default template.
//!
//! A [`Slot`] is stored in real page units and serialized with the keys the
//! server-side renderer reads (`max_w`, `max_h`, `max_font_size`). Records
//! written by older clients are accepted through a tolerant wire shape that fills in
//! missing fields and normalizes rotation and font size on the way in.
//!
//! Mirror pairs are explicit: each slot may name the id of the slot whose
//! `content` it shares. The default template links its four slots once, at
//! construction, in the order `[TopLeft, BottomLeft, TopRight, BottomRight]`.

#[cfg(test)]
#[path = "slot_test.rs"]
mod slot_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    FALLBACK_FONT_SIZE, FONT_MIN, NEW_SLOT_CONTENT, NEW_SLOT_FONT_SIZE, NEW_SLOT_MAX_HEIGHT, NEW_SLOT_MAX_WIDTH,
    NEW_SLOT_X, NEW_SLOT_Y, PLACEHOLDER_CONTENT,
};

/// Unique identifier for a slot.
pub type SlotId = Uuid;

/// A positionable, rotatable text element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSlot")]
pub struct Slot {
    /// Unique identifier, stable for the slot's lifetime.
    pub id: SlotId,
    /// Text to print. Empty content renders as [`PLACEHOLDER_CONTENT`].
    pub content: String,
    /// Center x in real units.
    pub x: i32,
    /// Center y in real units.
    pub y: i32,
    /// Clockwise rotation in degrees, always in `[0, 360)`.
    pub rotation: i32,
    /// Width of the bounding box centered on `(x, y)`.
    #[serde(rename = "max_w")]
    pub max_width: i32,
    /// Height of the bounding box centered on `(x, y)`.
    #[serde(rename = "max_h")]
    pub max_height: i32,
    /// Font size in real units, shared with the server renderer.
    pub max_font_size: i32,
    /// Display-only name for listing panels.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// Slot whose `content` mirrors this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_partner: Option<SlotId>,
}

impl Slot {
    /// A new text slot with the documented defaults and a fresh id.
    #[must_use]
    pub fn new_text() -> Self {
        Self {
            id: Uuid::new_v4(),
            content: NEW_SLOT_CONTENT.to_owned(),
            x: NEW_SLOT_X,
            y: NEW_SLOT_Y,
            rotation: 0,
            max_width: NEW_SLOT_MAX_WIDTH,
            max_height: NEW_SLOT_MAX_HEIGHT,
            max_font_size: NEW_SLOT_FONT_SIZE,
            label: String::new(),
            mirror_partner: None,
        }
    }

    /// Content as displayed: the placeholder when empty.
    #[must_use]
    pub fn display_content(&self) -> &str {
        if self.content.is_empty() { PLACEHOLDER_CONTENT } else { &self.content }
    }

    /// Label as displayed in listing panels.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            let id = self.id.simple().to_string();
            format!("Text slot {}", &id[..8])
        } else {
            self.label.clone()
        }
    }

    /// Shallow-merge `patch` into this slot, normalizing rotation and clamping sizes.
    pub fn apply(&mut self, patch: &SlotPatch) {
        if let Some(ref content) = patch.content {
            self.content.clone_from(content);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(r) = patch.rotation {
            self.rotation = normalize_rotation(r);
        }
        if let Some(w) = patch.max_width {
            self.max_width = w.max(1);
        }
        if let Some(h) = patch.max_height {
            self.max_height = h.max(1);
        }
        if let Some(f) = patch.max_font_size {
            self.max_font_size = clamp_font_size(f);
        }
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
        }
    }
}

/// Sparse update for a slot. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
    #[serde(rename = "max_w", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<i32>,
    #[serde(rename = "max_h", skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_font_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SlotPatch {
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    #[must_use]
    pub fn position(x: i32, y: i32) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    #[must_use]
    pub fn rotation(degrees: i32) -> Self {
        Self { rotation: Some(degrees), ..Default::default() }
    }

    #[must_use]
    pub fn font_size(size: i32) -> Self {
        Self { max_font_size: Some(size), ..Default::default() }
    }

    /// Returns `true` if the patch touches no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Wire shape accepted when reading slots, tolerant of older records.
///
/// Numbers are read as `f64` since older editors stored raw input values.
#[derive(Deserialize)]
struct StoredSlot {
    #[serde(default = "Uuid::new_v4")]
    id: SlotId,
    #[serde(default)]
    content: String,
    x: Option<f64>,
    y: Option<f64>,
    rotation: Option<f64>,
    max_w: Option<f64>,
    max_h: Option<f64>,
    max_font_size: Option<f64>,
    #[serde(rename = "fontSize")]
    font_size: Option<f64>,
    #[serde(default)]
    label: String,
    #[serde(default)]
    mirror_partner: Option<SlotId>,
}

/// Round a stored number to whole units, saturating at the `i32` range.
#[allow(clippy::cast_possible_truncation)]
fn units(value: Option<f64>, default: i32) -> i32 {
    match value {
        Some(v) if v.is_finite() => v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32,
        _ => default,
    }
}

impl From<StoredSlot> for Slot {
    fn from(s: StoredSlot) -> Self {
        let font = units(s.max_font_size.or(s.font_size), FALLBACK_FONT_SIZE);
        Self {
            id: s.id,
            content: s.content,
            x: units(s.x, NEW_SLOT_X),
            y: units(s.y, NEW_SLOT_Y),
            rotation: normalize_rotation(units(s.rotation, 0)),
            max_width: units(s.max_w, NEW_SLOT_MAX_WIDTH).max(1),
            max_height: units(s.max_h, NEW_SLOT_MAX_HEIGHT).max(1),
            max_font_size: clamp_font_size(font),
            label: s.label,
            mirror_partner: s.mirror_partner,
        }
    }
}

/// Wrap any integer angle into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Apply the font size floor shared by every mutation path.
#[must_use]
pub fn clamp_font_size(size: i32) -> i32 {
    size.max(FONT_MIN)
}

// ── Default template ────────────────────────────────────────────

/// Quadrant of the default two-sided badge template, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePosition {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl TemplatePosition {
    /// All positions in template order.
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::BottomLeft, Self::TopRight, Self::BottomRight];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "Top Left",
            Self::BottomLeft => "Bottom Left",
            Self::TopRight => "Top Right",
            Self::BottomRight => "Bottom Right",
        }
    }

    /// Factory geometry `(x, y, rotation)`. The right side faces the opposite reading direction.
    fn placement(self) -> (i32, i32, i32) {
        match self {
            Self::TopLeft => (944, 887, 90),
            Self::BottomLeft => (944, 2605, 90),
            Self::TopRight => (1613, 969, -90),
            Self::BottomRight => (1613, 2681, -90),
        }
    }
}

/// Build the four-slot default template with fresh ids and linked mirror pairs.
#[must_use]
pub fn default_template() -> Vec<Slot> {
    let mut slots: Vec<Slot> = TemplatePosition::ALL
        .iter()
        .map(|pos| {
            let (x, y, rotation) = pos.placement();
            Slot {
                id: Uuid::new_v4(),
                content: PLACEHOLDER_CONTENT.to_owned(),
                x,
                y,
                rotation: normalize_rotation(rotation),
                max_width: 1800,
                max_height: 400,
                max_font_size: FALLBACK_FONT_SIZE,
                label: pos.label().to_owned(),
                mirror_partner: None,
            }
        })
        .collect();
    link_mirror_pairs_by_index(&mut slots);
    slots
}

/// Positional partner of `index` in the template order: 0↔2, 1↔3.
#[must_use]
pub fn index_partner(index: usize) -> Option<usize> {
    match index {
        0 => Some(2),
        2 => Some(0),
        1 => Some(3),
        3 => Some(1),
        _ => None,
    }
}

/// Resolve mirror links from list positions. Slots beyond index 3 are left unlinked.
pub fn link_mirror_pairs_by_index(slots: &mut [Slot]) {
    let ids: Vec<SlotId> = slots.iter().map(|s| s.id).collect();
    for (index, slot) in slots.iter_mut().enumerate() {
        slot.mirror_partner = index_partner(index).and_then(|p| ids.get(p).copied());
    }
}
