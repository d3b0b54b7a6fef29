//! Scene description: what a presentation layer should draw for the current state.
//!
//! This module computes screen-space views from the controller and its store.
//! It never mutates state and does not draw anything itself; the host turns
//! each [`SlotView`] into positioned, rotated text with optional handles.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::hit::{HitPart, ScreenBox};
use crate::interaction::Controller;
use crate::slot::{Slot, SlotId};
use crate::store::EditorMode;
use crate::transform::{Point, is_out_of_bounds, page_size_screen, screen_font_px};

/// One slot as it should appear on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub id: SlotId,
    /// Box center, rotation, and size in screen pixels. Follows a drag in progress.
    pub frame: ScreenBox,
    /// Font size in screen pixels.
    pub font_px: f64,
    /// Text to draw: the edit draft, the content, or the placeholder.
    pub text: String,
    pub label: String,
    /// Highlighted as part of the selection. Only in design mode.
    pub selected: bool,
    /// Center lies outside the page; drawn with a warning outline.
    pub out_of_bounds: bool,
    /// Open in the inline text editor.
    pub editing: bool,
    /// Handle centers to draw; empty unless the slot is selected in design mode.
    pub handles: Vec<(HitPart, Point)>,
}

/// Screen size `(width, height)` of the page at the controller's scale.
#[must_use]
pub fn page_size(controller: &Controller) -> (f64, f64) {
    page_size_screen(controller.scale())
}

/// Views for every slot, in list order (later slots draw on top).
#[must_use]
pub fn scene(controller: &Controller) -> Vec<SlotView> {
    controller.store.slots().iter().map(|slot| slot_view(controller, slot)).collect()
}

fn slot_view(controller: &Controller, slot: &Slot) -> SlotView {
    let scale = controller.scale();
    let design = controller.store.mode() == EditorMode::Design;
    let selected = design && controller.store.selection().contains(&slot.id);

    let mut frame = ScreenBox::of_slot(slot, scale);
    if let Some(center) = controller.drag_preview(slot.id) {
        frame.center = center;
    }

    let draft = controller.edit_draft(slot.id);
    let text = draft.unwrap_or_else(|| slot.display_content()).to_owned();
    let handles = if selected && draft.is_none() { frame.handles().to_vec() } else { Vec::new() };

    SlotView {
        id: slot.id,
        frame,
        font_px: screen_font_px(slot, scale),
        text,
        label: slot.display_label(),
        selected,
        out_of_bounds: is_out_of_bounds(slot),
        editing: draft.is_some(),
        handles,
    }
}
