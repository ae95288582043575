use pretty_assertions::assert_eq;
use smarterr::types::accumulator::{Accumulator, DIAGNOSTICS_HEADING};

#[test]
fn push_unique_skips_repeats() {
    let mut notes = Accumulator::new();
    assert!(notes.push_unique("invalid regex".to_string()));
    assert!(!notes.push_unique("invalid regex".to_string()));
    assert!(notes.push_unique("unknown step".to_string()));
    assert_eq!(notes.len(), 2);
}

#[test]
fn section_is_appended_after_a_blank_line() {
    let notes: Accumulator<&str> = ["first", "second"].into_iter().collect();
    let mut detail = String::from("boom");
    notes.append_to(&mut detail);
    assert_eq!(
        detail,
        format!("boom\n\n{DIAGNOSTICS_HEADING}\n- first\n- second")
    );
}

#[test]
fn empty_accumulator_leaves_detail_alone() {
    let notes: Accumulator<String> = Accumulator::new();
    let mut detail = String::from("boom");
    notes.append_to(&mut detail);
    assert_eq!(detail, "boom");
    assert_eq!(notes.render_section(), None);
}
