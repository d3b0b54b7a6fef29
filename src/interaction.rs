//! Interaction controller: turns pointer and keyboard events into store mutations.
//!
//! The [`Controller`] owns the [`EditorStore`], the current fit scale, and the
//! gesture in progress. Handlers return [`Action`]s for the host to process
//! (redraw, open or close the inline text editor, change the cursor); they
//! never touch the host directly, so the whole controller is testable without
//! a browser.
//!
//! Geometry gestures (drag, resize, rotate, nudge) and the floating toolbar
//! only act in [`EditorMode::Design`]. Drags are previewed in screen space and
//! committed once on release; resize and rotate commit on every move.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use crate::consts::{FONT_STEP, INITIAL_SCALE};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, Gesture, Key, KeyCommand, Modifiers};
use crate::slot::{SlotId, SlotPatch};
use crate::store::{EditorMode, EditorStore};
use crate::transform::{
    Direction, Point, fit_scale, point_to_real, resize_by_corner, rotate_by_pointer, slot_center_screen,
    step_font_size, step_nudge, step_rotation,
};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The scene changed and should be redrawn.
    RenderNeeded,
    /// A mutation for this slot was recorded in the store.
    SlotCommitted { id: SlotId },
    /// Open the inline editor over this slot, seeded with `text`.
    EditTextRequested { id: SlotId, text: String },
    /// Close the inline editor. `committed` is whether the text was stored.
    EditFinished { id: SlotId, committed: bool },
    /// Change the pointer cursor to a CSS cursor name.
    SetCursor(String),
}

/// Editor state plus everything needed to interpret input against it.
#[derive(Debug)]
pub struct Controller {
    pub store: EditorStore,
    scale: f64,
    viewport_width: f64,
    viewport_height: f64,
    gesture: Gesture,
}

impl Default for Controller {
    fn default() -> Self {
        Self::with_store(EditorStore::new())
    }
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_store(store: EditorStore) -> Self {
        Self { store, scale: INITIAL_SCALE, viewport_width: 0.0, viewport_height: 0.0, gesture: Gesture::Idle }
    }

    // --- Queries ---

    /// Current real→screen scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Last reported container size `(width, height)` in CSS pixels.
    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Screen center `id` should be drawn at while it is being dragged.
    #[must_use]
    pub fn drag_preview(&self, id: SlotId) -> Option<Point> {
        match self.gesture {
            Gesture::Dragging { id: dragged, start, origin, current } if dragged == id => {
                Some(Point::new(origin.x + current.x - start.x, origin.y + current.y - start.y))
            }
            _ => None,
        }
    }

    /// Draft text for `id` while it is open in the inline editor.
    #[must_use]
    pub fn edit_draft(&self, id: SlotId) -> Option<&str> {
        match &self.gesture {
            Gesture::Editing { id: editing, draft } if *editing == id => Some(draft),
            _ => None,
        }
    }

    // --- Viewport ---

    /// Record the container size and refit the page.
    ///
    /// A container with no usable size keeps the previous scale.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        let Some(scale) = fit_scale(width, height) else {
            tracing::debug!(width, height, "viewport has no usable size; keeping scale");
            return Vec::new();
        };
        if (scale - self.scale).abs() <= f64::EPSILON {
            return Vec::new();
        }
        self.scale = scale;
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        // Clicking anywhere while the inline editor is open is a loss of focus.
        let mut actions = if matches!(self.gesture, Gesture::Editing { .. }) { self.commit_edit() } else { Vec::new() };
        self.gesture = Gesture::Idle;

        let mode = self.store.mode();
        if !mode.shows_canvas() {
            return actions;
        }

        let hit = hit_test(screen_pt, self.store.slots(), self.store.selection(), self.scale, mode.allows_geometry());
        let Some(hit) = hit else {
            if self.store.select(None, false) {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };
        // Slots swallow clicks on a read-only canvas.
        if !mode.allows_geometry() {
            return actions;
        }

        let Some(slot) = self.store.slot(&hit.slot_id) else {
            return actions;
        };
        let center = slot_center_screen(slot, self.scale);
        let initial_font = slot.max_font_size;

        match hit.part {
            HitPart::ResizeHandle(corner) => {
                self.gesture = Gesture::Resizing { id: hit.slot_id, center, initial_font, start: screen_pt };
                actions.push(Action::SetCursor(corner.cursor().to_owned()));
            }
            HitPart::RotateHandle => {
                self.gesture = Gesture::Rotating { id: hit.slot_id, center };
                actions.push(Action::SetCursor("grabbing".to_owned()));
            }
            HitPart::Body => {
                self.store.select(Some(hit.slot_id), modifiers.multi_select());
                if self.store.selection().contains(&hit.slot_id) {
                    self.gesture =
                        Gesture::Dragging { id: hit.slot_id, start: screen_pt, origin: center, current: screen_pt };
                    actions.push(Action::SetCursor("move".to_owned()));
                }
            }
        }
        tracing::debug!(slot_id = %hit.slot_id, part = ?hit.part, "gesture started");
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.gesture {
            Gesture::Dragging { current, .. } => {
                *current = screen_pt;
                vec![Action::RenderNeeded]
            }
            Gesture::Resizing { id, center, initial_font, start } => {
                let id = *id;
                let size = resize_by_corner(*center, *initial_font, *start, screen_pt);
                self.commit(id, &SlotPatch::font_size(size))
            }
            Gesture::Rotating { id, center } => {
                let id = *id;
                let degrees = rotate_by_pointer(*center, screen_pt);
                self.commit(id, &SlotPatch::rotation(degrees))
            }
            Gesture::Idle | Gesture::Editing { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.gesture) {
            Gesture::Dragging { id, start, origin, .. } => {
                let mut actions = vec![Action::SetCursor("default".to_owned())];
                if start.distance(screen_pt) <= f64::EPSILON {
                    actions.push(Action::RenderNeeded);
                    return actions;
                }
                let moved = Point::new(origin.x + screen_pt.x - start.x, origin.y + screen_pt.y - start.y);
                let (x, y) = point_to_real(moved, self.scale);
                actions.extend(self.commit(id, &SlotPatch::position(x, y)));
                actions.push(Action::RenderNeeded);
                actions
            }
            Gesture::Resizing { .. } | Gesture::Rotating { .. } => {
                vec![Action::SetCursor("default".to_owned()), Action::RenderNeeded]
            }
            editing @ Gesture::Editing { .. } => {
                self.gesture = editing;
                Vec::new()
            }
            Gesture::Idle => Vec::new(),
        }
    }

    /// Open the inline editor on the slot body under `screen_pt`.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.store.mode().shows_canvas() {
            return Vec::new();
        }
        let hit = hit_test(screen_pt, self.store.slots(), self.store.selection(), self.scale, false);
        let Some(hit) = hit else {
            return Vec::new();
        };
        let Some(text) = self.store.slot(&hit.slot_id).map(|s| s.display_content().to_owned()) else {
            return Vec::new();
        };

        let mut actions = if matches!(self.gesture, Gesture::Editing { .. }) { self.commit_edit() } else { Vec::new() };
        self.gesture = Gesture::Editing { id: hit.slot_id, draft: text.clone() };
        tracing::debug!(slot_id = %hit.slot_id, "edit started");
        actions.push(Action::EditTextRequested { id: hit.slot_id, text });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Text editing ---

    /// Replace the draft of the open editor. Returns `false` when no edit is open.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.gesture {
            Gesture::Editing { draft, .. } => {
                *draft = text.into();
                true
            }
            _ => false,
        }
    }

    /// Close the editor, storing the draft when it differs from the slot's content.
    pub fn commit_edit(&mut self) -> Vec<Action> {
        let Gesture::Editing { id, draft } = std::mem::take(&mut self.gesture) else {
            return Vec::new();
        };
        let changed = self.store.slot(&id).is_some_and(|s| s.content != draft);
        let committed = changed && self.store.update_slot(id, &SlotPatch::content(draft));
        let mut actions = Vec::new();
        if committed {
            actions.push(Action::SlotCommitted { id });
        }
        actions.push(Action::EditFinished { id, committed });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Close the editor without storing anything.
    pub fn cancel_edit(&mut self) -> Vec<Action> {
        let Gesture::Editing { id, .. } = std::mem::take(&mut self.gesture) else {
            return Vec::new();
        };
        vec![Action::EditFinished { id, committed: false }, Action::RenderNeeded]
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if matches!(self.gesture, Gesture::Editing { .. }) {
            if key.is_enter() && !modifiers.shift {
                return self.commit_edit();
            }
            if key.is_escape() {
                return self.cancel_edit();
            }
            return Vec::new();
        }
        if !self.gesture.is_idle() {
            return Vec::new();
        }

        match KeyCommand::from_key(key, modifiers) {
            Some(KeyCommand::Undo) => Self::render_if(self.store.undo()),
            Some(KeyCommand::Redo) => Self::render_if(self.store.redo()),
            Some(KeyCommand::Nudge { direction, coarse }) => self.nudge(direction, coarse),
            None => Vec::new(),
        }
    }

    /// Move the primary selection one step. Other selected slots stay put.
    fn nudge(&mut self, direction: Direction, coarse: bool) -> Vec<Action> {
        let Some((id, (x, y))) = self.primary_in_design().and_then(|id| {
            let slot = self.store.slot(&id)?;
            Some((id, step_nudge(slot, direction, coarse)))
        }) else {
            return Vec::new();
        };
        self.commit(id, &SlotPatch::position(x, y))
    }

    // --- Floating toolbar ---

    /// Grow the primary selection's font by one step.
    pub fn grow_font(&mut self) -> Vec<Action> {
        self.step_font(FONT_STEP)
    }

    /// Shrink the primary selection's font by one step, never below the floor.
    pub fn shrink_font(&mut self) -> Vec<Action> {
        self.step_font(-FONT_STEP)
    }

    fn step_font(&mut self, delta: i32) -> Vec<Action> {
        let Some((id, size)) = self.primary_in_design().and_then(|id| {
            let slot = self.store.slot(&id)?;
            Some((id, step_font_size(slot.max_font_size, delta)))
        }) else {
            return Vec::new();
        };
        self.commit(id, &SlotPatch::font_size(size))
    }

    /// Rotate the primary selection by 90°, or 15° with `fine`.
    pub fn rotate_step(&mut self, fine: bool) -> Vec<Action> {
        let Some((id, degrees)) = self.primary_in_design().and_then(|id| {
            let slot = self.store.slot(&id)?;
            Some((id, step_rotation(slot.rotation, fine)))
        }) else {
            return Vec::new();
        };
        self.commit(id, &SlotPatch::rotation(degrees))
    }

    /// Delete the primary selection.
    pub fn delete_primary(&mut self) -> Vec<Action> {
        let Some(id) = self.primary_in_design() else {
            return Vec::new();
        };
        if self.gesture.slot_id() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        Self::render_if(self.store.delete_slots(&[id]) > 0)
    }

    // --- Helpers ---

    fn primary_in_design(&self) -> Option<SlotId> {
        if self.store.mode() == EditorMode::Design { self.store.primary_selection() } else { None }
    }

    fn commit(&mut self, id: SlotId, patch: &SlotPatch) -> Vec<Action> {
        if self.store.update_slot(id, patch) {
            vec![Action::SlotCommitted { id }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn render_if(changed: bool) -> Vec<Action> {
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }
}
