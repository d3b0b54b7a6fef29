//! Editor store: the canonical slot list, its undo history, selection, and mode.
//!
//! Every mutation builds the next slot list from the current present and
//! commits it as one history step, so paired content changes are always undone
//! together. Mutations that reference an unknown id, or that would leave the
//! list unchanged, are dropped without touching history.
//!
//! Selection and mode live beside the history, not inside it: undoing never
//! changes the mode, and selection is only pruned so it cannot name a slot that
//! no longer exists.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::slot::{Slot, SlotId, SlotPatch, default_template, link_mirror_pairs_by_index};

/// Which editor page is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Name entry page; the canvas is not shown.
    #[default]
    Names,
    /// Interactive canvas where slot geometry may be edited.
    Design,
    /// Read-only canvas preview.
    Preview,
}

impl EditorMode {
    /// Whether drag, resize, rotate, and nudge gestures are allowed.
    #[must_use]
    pub fn allows_geometry(self) -> bool {
        matches!(self, Self::Design)
    }

    /// Whether the canvas is on screen, so clicks and text edits reach it.
    #[must_use]
    pub fn shows_canvas(self) -> bool {
        matches!(self, Self::Design | Self::Preview)
    }
}

/// Ordered set of selected slot ids. The first id is the primary selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<SlotId>,
}

impl Selection {
    /// The id single-target panels act on.
    #[must_use]
    pub fn primary(&self) -> Option<SlotId> {
        self.ids.first().copied()
    }

    #[must_use]
    pub fn contains(&self, id: &SlotId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[SlotId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn toggle(&mut self, id: SlotId) {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    fn set_single(&mut self, id: Option<SlotId>) {
        self.ids.clear();
        self.ids.extend(id);
    }

    fn clear(&mut self) {
        self.ids.clear();
    }

    fn retain_present(&mut self, slots: &[Slot]) {
        self.ids.retain(|id| slots.iter().any(|s| s.id == *id));
    }
}

/// Owns the slot list history plus the non-historical editor state.
#[derive(Debug, Clone)]
pub struct EditorStore {
    history: History<Vec<Slot>>,
    selection: Selection,
    mode: EditorMode,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// Start from the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::from_history(History::new(default_template()))
    }

    /// Start from the default template retaining at most `limit` undo steps.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self::from_history(History::with_limit(default_template(), limit))
    }

    fn from_history(history: History<Vec<Slot>>) -> Self {
        Self { history, selection: Selection::default(), mode: EditorMode::default() }
    }

    // --- Queries ---

    /// The present slot list, in template order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        self.history.present()
    }

    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slots().iter().find(|s| s.id == *id)
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn primary_selection(&self) -> Option<SlotId> {
        self.selection.primary()
    }

    /// Selected slots in selection order.
    #[must_use]
    pub fn selected_slots(&self) -> Vec<&Slot> {
        self.selection.ids().iter().filter_map(|id| self.slot(id)).collect()
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub fn history(&self) -> &History<Vec<Slot>> {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Mutations ---

    /// Shallow-merge `patch` into the slot `id`.
    ///
    /// A `content` change is copied onto the slot's mirror partner within the
    /// same history step. Returns `false` (and records nothing) when the slot
    /// does not exist or the patch changes nothing.
    pub fn update_slot(&mut self, id: SlotId, patch: &SlotPatch) -> bool {
        let present = self.history.present();
        let mut next = present.clone();
        let Some(slot) = next.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(slot_id = %id, "update for unknown slot dropped");
            return false;
        };
        slot.apply(patch);
        let partner = slot.mirror_partner;

        if let (Some(content), Some(partner)) = (patch.content.as_ref(), partner) {
            if let Some(mirror) = next.iter_mut().find(|s| s.id == partner) {
                mirror.content.clone_from(content);
            }
        }

        if next == *present {
            return false;
        }
        self.history.commit(next);
        tracing::debug!(slot_id = %id, mirrored = ?partner.filter(|_| patch.content.is_some()), "slot updated");
        true
    }

    /// Append a new slot built from the defaults overridden by `patch`. Selection is unchanged.
    pub fn add_slot(&mut self, patch: &SlotPatch) -> SlotId {
        let mut slot = Slot::new_text();
        slot.apply(patch);
        let id = slot.id;

        let mut next = self.history.present().clone();
        next.push(slot);
        self.history.commit(next);
        tracing::debug!(slot_id = %id, "slot added");
        id
    }

    /// Remove every slot whose id is in `ids` and clear the selection.
    ///
    /// Mirror links pointing at removed slots are dropped. Returns the number
    /// of slots removed; nothing is recorded when none matched.
    pub fn delete_slots(&mut self, ids: &[SlotId]) -> usize {
        self.selection.clear();

        let doomed: HashSet<SlotId> = ids.iter().copied().collect();
        let present = self.history.present();
        let mut next: Vec<Slot> = present.iter().filter(|s| !doomed.contains(&s.id)).cloned().collect();
        let removed = present.len() - next.len();
        if removed == 0 {
            return 0;
        }
        for slot in &mut next {
            if slot.mirror_partner.is_some_and(|p| doomed.contains(&p)) {
                slot.mirror_partner = None;
            }
        }
        self.history.commit(next);
        tracing::debug!(removed, "slots deleted");
        removed
    }

    /// Step back one history entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.selection.retain_present(self.history.present());
        }
        moved
    }

    /// Step forward one history entry. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.selection.retain_present(self.history.present());
        }
        moved
    }

    /// Change the selection.
    ///
    /// `target = None` deselects everything (ignored when `multi`). With
    /// `multi`, the id is toggled; otherwise it becomes the only selection.
    /// Ids not in the present list are ignored. Returns whether the selection changed.
    pub fn select(&mut self, target: Option<SlotId>, multi: bool) -> bool {
        if let Some(id) = target {
            if self.slot(&id).is_none() {
                tracing::debug!(slot_id = %id, "select for unknown slot dropped");
                return false;
            }
        }
        let before = self.selection.clone();
        match (target, multi) {
            (Some(id), true) => self.selection.toggle(id),
            (None, true) => {}
            (target, false) => self.selection.set_single(target),
        }
        self.selection != before
    }

    /// Replace the slot list with a fresh default template and drop all history and selection.
    pub fn reset_to_default(&mut self) {
        self.history.reset(default_template());
        self.selection.clear();
        tracing::info!("layout reset to default template");
    }

    /// Replace the slot list wholesale, as when loading a saved layout.
    ///
    /// Duplicate ids are dropped (first occurrence wins). Lists that carry no
    /// mirror links at all are linked by template position. History and
    /// selection are cleared.
    pub fn replace_slots(&mut self, slots: Vec<Slot>) {
        let mut seen = HashSet::new();
        let total = slots.len();
        let mut unique: Vec<Slot> = slots.into_iter().filter(|s| seen.insert(s.id)).collect();
        if unique.len() < total {
            tracing::warn!(dropped = total - unique.len(), "duplicate slot ids dropped on load");
        }
        if unique.iter().all(|s| s.mirror_partner.is_none()) {
            link_mirror_pairs_by_index(&mut unique);
        }
        self.history.reset(unique);
        self.selection.clear();
        tracing::info!(slots = self.slots().len(), "layout replaced");
    }

    /// Switch editor page. Selection and history are kept.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "mode changed");
            self.mode = mode;
        }
    }
}
