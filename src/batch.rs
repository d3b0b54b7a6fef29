//! Batch render planning: which names go on which printed document.
//!
//! The server renders one document per pair of names. It fills slots by list
//! position: the first name of a pair goes to indices 0 and 2, the second to
//! indices 1 and 3, and a missing second name prints the placeholder. This
//! module builds the request for that contract and predicts what the server
//! will return; it performs no I/O.

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;

use serde::Serialize;

use crate::consts::PLACEHOLDER_CONTENT;
use crate::slot::{Slot, SlotPatch};
use crate::store::EditorStore;

/// Names printed on each document.
pub const NAMES_PER_PAGE: usize = 2;

/// Download name when more than one document comes back zipped.
pub const ARCHIVE_FILENAME: &str = "crachas_finalizados.zip";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("no names to export")]
    NoNames,
    #[error("add at least one name, in the list or on the badge")]
    PlaceholderOnly,
    #[error("layout needs at least {needed} slots, found {found}")]
    NotEnoughSlots { needed: usize, found: usize },
}

/// Split a newline-separated name list, trimming each line and dropping blanks.
#[must_use]
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.lines().map(str::trim).filter(|n| !n.is_empty()).map(str::to_owned).collect()
}

/// Names typed directly onto the badge: the contents of slots 0 and 1.
///
/// Fails when the layout has fewer than two slots or when both still show
/// the placeholder. Empty contents are skipped.
pub fn names_from_slots(slots: &[Slot]) -> Result<Vec<String>, BatchError> {
    let [top, bottom, ..] = slots else {
        return Err(BatchError::NotEnoughSlots { needed: 2, found: slots.len() });
    };
    let is_placeholder = |s: &Slot| s.content.trim().is_empty() || s.content == PLACEHOLDER_CONTENT;
    if is_placeholder(top) && is_placeholder(bottom) {
        return Err(BatchError::PlaceholderOnly);
    }
    Ok([top, bottom]
        .into_iter()
        .map(|s| s.content.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Names to export: the list when it has any text, otherwise the badge itself.
pub fn export_names(raw_list: &str, slots: &[Slot]) -> Result<Vec<String>, BatchError> {
    if raw_list.trim().is_empty() {
        return names_from_slots(slots);
    }
    let names = parse_name_list(raw_list);
    if names.is_empty() { Err(BatchError::NoNames) } else { Ok(names) }
}

/// File name the server gives a single document: `crachas_<names>.pdf`,
/// names joined with `-` and inner whitespace replaced by `_`.
#[must_use]
pub fn document_filename(names: &[String]) -> String {
    let joined = names
        .iter()
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join("_"))
        .collect::<Vec<_>>()
        .join("-");
    format!("crachas_{joined}.pdf")
}

/// One printed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// One or two names, in print order.
    pub names: Vec<String>,
    pub filename: String,
}

/// What the server returns for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutput {
    /// A single PDF.
    Document { filename: String },
    /// A zip of PDFs.
    Archive { filename: String },
}

impl BatchOutput {
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Document { filename } | Self::Archive { filename } => filename,
        }
    }
}

/// Pages and download for a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub pages: Vec<Page>,
    pub output: BatchOutput,
}

impl BatchPlan {
    /// Pair up `names`. Up to two names come back as one PDF; more as a zip.
    pub fn new(names: &[String]) -> Result<Self, BatchError> {
        if names.is_empty() {
            return Err(BatchError::NoNames);
        }
        let pages: Vec<Page> = names
            .chunks(NAMES_PER_PAGE)
            .map(|pair| Page { names: pair.to_vec(), filename: document_filename(pair) })
            .collect();
        let output = if names.len() <= NAMES_PER_PAGE {
            BatchOutput::Document { filename: document_filename(names) }
        } else {
            BatchOutput::Archive { filename: ARCHIVE_FILENAME.to_owned() }
        };
        tracing::debug!(names = names.len(), documents = pages.len(), "batch planned");
        Ok(Self { pages, output })
    }

    /// Number of documents the server will render.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.pages.len()
    }
}

/// Slot list as the server fills it for one page.
#[must_use]
pub fn page_slots(slots: &[Slot], page: &Page) -> Vec<Slot> {
    let name = |i: usize| page.names.get(i).map_or(PLACEHOLDER_CONTENT, |n| n.trim()).to_owned();
    slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let mut slot = slot.clone();
            match index {
                0 | 2 => slot.content = name(0),
                1 | 3 => slot.content = name(1),
                _ => {}
            }
            slot
        })
        .collect()
}

/// One slot in the batch request: the slot's own keys plus `type` and `fontSize`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestElement {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub slot: Slot,
    #[serde(rename = "fontSize")]
    pub font_size: i32,
}

impl From<&Slot> for RequestElement {
    fn from(slot: &Slot) -> Self {
        Self { kind: "text", slot: slot.clone(), font_size: slot.max_font_size }
    }
}

/// Body of the batch render request.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub names: Vec<String>,
    pub elements: Vec<RequestElement>,
}

impl BatchRequest {
    pub fn new(names: Vec<String>, slots: &[Slot]) -> Result<Self, BatchError> {
        if names.is_empty() {
            return Err(BatchError::NoNames);
        }
        Ok(Self { names, elements: slots.iter().map(RequestElement::from).collect() })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Show the first two names of `raw_list` on the canvas.
///
/// The first name goes into slot 0 and the second into slot 1; mirroring
/// carries them to their partners. Slots whose content already matches are
/// left alone. Returns whether anything changed.
pub fn preview_names(store: &mut EditorStore, raw_list: &str) -> bool {
    let names = parse_name_list(raw_list);
    let targets: Vec<_> = store.slots().iter().take(NAMES_PER_PAGE).map(|s| s.id).collect();
    let mut changed = false;
    for (id, name) in targets.into_iter().zip(names) {
        changed |= store.update_slot(id, &SlotPatch::content(name));
    }
    changed
}
