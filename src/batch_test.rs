use serde_json::Value;

use super::*;
use crate::slot::default_template;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================
// Name sources
// =============================================================

#[test]
fn parse_name_list_trims_and_drops_blanks() {
    let parsed = parse_name_list("  Ana Silva \n\n\tBia\n   \nCaio\r\n");
    assert_eq!(parsed, ["Ana Silva", "Bia", "Caio"]);
}

#[test]
fn parse_empty_list() {
    assert!(parse_name_list("").is_empty());
    assert!(parse_name_list("\n  \n").is_empty());
}

#[test]
fn names_from_slots_reads_top_and_bottom() {
    let mut slots = default_template();
    slots[0].content = "Ana".to_owned();
    slots[1].content = "Bia".to_owned();
    assert_eq!(names_from_slots(&slots).unwrap(), ["Ana", "Bia"]);
}

#[test]
fn names_from_slots_allows_one_placeholder() {
    let mut slots = default_template();
    slots[1].content = "Bia".to_owned();
    // The untouched slot still prints its placeholder text as a name.
    assert_eq!(names_from_slots(&slots).unwrap(), ["Nome Sobrenome", "Bia"]);
}

#[test]
fn names_from_slots_skips_empty_content() {
    let mut slots = default_template();
    slots[0].content = "Ana".to_owned();
    slots[1].content = String::new();
    assert_eq!(names_from_slots(&slots).unwrap(), ["Ana"]);
}

#[test]
fn names_from_slots_rejects_untouched_template() {
    assert_eq!(names_from_slots(&default_template()), Err(BatchError::PlaceholderOnly));
}

#[test]
fn names_from_slots_needs_two_slots() {
    let slots = vec![Slot::new_text()];
    assert_eq!(names_from_slots(&slots), Err(BatchError::NotEnoughSlots { needed: 2, found: 1 }));
}

#[test]
fn export_prefers_list_over_badge() {
    let mut slots = default_template();
    slots[0].content = "Manual".to_owned();
    assert_eq!(export_names("Ana\nBia", &slots).unwrap(), ["Ana", "Bia"]);
    assert_eq!(export_names("   ", &slots).unwrap(), ["Manual", "Nome Sobrenome"]);
}

// =============================================================
// BatchPlan
// =============================================================

#[test]
fn three_names_make_two_documents_zipped() {
    let plan = BatchPlan::new(&names(&["Ana", "Bia", "Caio"])).unwrap();
    assert_eq!(plan.document_count(), 2);
    assert_eq!(plan.pages[0].names, ["Ana", "Bia"]);
    assert_eq!(plan.pages[1].names, ["Caio"]);
    assert_eq!(plan.pages[1].filename, "crachas_Caio.pdf");
    assert_eq!(plan.output, BatchOutput::Archive { filename: "crachas_finalizados.zip".to_owned() });
}

#[test]
fn two_names_make_one_pdf() {
    let plan = BatchPlan::new(&names(&["Ana Silva", "Bia  Souza"])).unwrap();
    assert_eq!(plan.document_count(), 1);
    assert_eq!(plan.output.filename(), "crachas_Ana_Silva-Bia_Souza.pdf");
}

#[test]
fn one_name_makes_one_pdf() {
    let plan = BatchPlan::new(&names(&["Ana"])).unwrap();
    assert_eq!(plan.output, BatchOutput::Document { filename: "crachas_Ana.pdf".to_owned() });
}

#[test]
fn document_count_is_half_rounded_up() {
    for n in 1usize..=9 {
        let list: Vec<String> = (0..n).map(|i| format!("Name {i}")).collect();
        assert_eq!(BatchPlan::new(&list).unwrap().document_count(), n.div_ceil(2));
    }
}

#[test]
fn empty_plan_is_rejected() {
    assert_eq!(BatchPlan::new(&[]), Err(BatchError::NoNames));
}

// =============================================================
// page_slots
// =============================================================

#[test]
fn page_slots_mirror_names_by_position() {
    let plan = BatchPlan::new(&names(&["Ana", "Bia", "Caio"])).unwrap();
    let template = default_template();

    let first = page_slots(&template, &plan.pages[0]);
    let contents: Vec<&str> = first.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, ["Ana", "Bia", "Ana", "Bia"]);

    let second = page_slots(&template, &plan.pages[1]);
    let contents: Vec<&str> = second.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, ["Caio", "Nome Sobrenome", "Caio", "Nome Sobrenome"]);
}

#[test]
fn page_slots_leave_extra_slots_alone() {
    let mut slots = default_template();
    slots.push(Slot::new_text());
    let page = Page { names: names(&["Ana"]), filename: String::new() };
    assert_eq!(page_slots(&slots, &page)[4].content, "New Text");
}

// =============================================================
// BatchRequest
// =============================================================

#[test]
fn request_carries_font_size_and_renderer_keys() {
    let mut slots = default_template();
    slots[0].max_font_size = 95;
    let request = BatchRequest::new(names(&["Ana"]), &slots).unwrap();
    let value: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

    assert_eq!(value["names"], serde_json::json!(["Ana"]));
    let first = &value["elements"][0];
    assert_eq!(first["type"], "text");
    assert_eq!(first["fontSize"], 95);
    assert_eq!(first["max_font_size"], 95);
    assert_eq!(first["max_w"], 1800);
    assert_eq!(first["x"], 944);
    assert_eq!(value["elements"].as_array().unwrap().len(), 4);
}

#[test]
fn request_without_names_is_rejected() {
    assert_eq!(BatchRequest::new(Vec::new(), &default_template()).err(), Some(BatchError::NoNames));
}

// =============================================================
// preview_names
// =============================================================

#[test]
fn preview_fills_both_pairs() {
    let mut store = EditorStore::new();
    assert!(preview_names(&mut store, "Ana\nBia\nCaio"));
    let contents: Vec<&str> = store.slots().iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, ["Ana", "Bia", "Ana", "Bia"]);
}

#[test]
fn preview_with_one_name_leaves_bottom() {
    let mut store = EditorStore::new();
    preview_names(&mut store, "Ana");
    assert_eq!(store.slots()[1].content, "Nome Sobrenome");
    assert_eq!(store.slots()[2].content, "Ana");
}

#[test]
fn preview_is_idempotent() {
    let mut store = EditorStore::new();
    preview_names(&mut store, "Ana\nBia");
    let steps = store.history().past().len();
    assert!(!preview_names(&mut store, "Ana\nBia"));
    assert_eq!(store.history().past().len(), steps);
}

#[test]
fn preview_empty_list_changes_nothing() {
    let mut store = EditorStore::new();
    assert!(!preview_names(&mut store, "\n"));
    assert!(!store.can_undo());
}
