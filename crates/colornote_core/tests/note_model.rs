use colornote_core::{foreground_for, Note, NoteValidationError, Rgb, DEFAULT_NOTE_COLOR};
use serde_json::json;

#[test]
fn fresh_note_sets_defaults() {
    let note = Note::new("Ideas", Some(DEFAULT_NOTE_COLOR));

    assert!(!note.id().as_str().is_empty());
    assert_eq!(note.title(), "Ideas");
    assert_eq!(note.content(), "");
    assert_eq!(note.explicit_order(), None);
    assert_eq!(note.color(), Some(Rgb::new(71, 166, 229)));
}

#[test]
fn non_text_content_is_rejected_after_construction() {
    let mut note = Note::new("t", None);
    note.set_content("first draft");

    for value in [json!(null), json!(3), json!(["a"]), json!({"k": "v"})] {
        let err = note.try_set_content(&value).unwrap_err();
        assert!(matches!(err, NoteValidationError::ContentNotText { .. }));
        assert_eq!(note.content(), "first draft");
    }
}

#[test]
fn change_color_is_in_memory_only_and_updates_foreground() {
    let mut note = Note::new("t", Some(Rgb::new(217, 27, 11)));
    assert_eq!(note.foreground(), Rgb::WHITE);

    note.change_color(Some(Rgb::LIGHT_GRAY));
    assert_eq!(note.color(), Some(Rgb::LIGHT_GRAY));
    assert_eq!(note.foreground(), Rgb::BLACK);

    note.change_color(None);
    assert_eq!(note.foreground(), Rgb::BLACK);
}

#[test]
fn contrast_rule_matches_designated_light_colors() {
    assert_eq!(foreground_for(Rgb::new(255, 255, 255)), Rgb::new(0, 0, 0));
    assert_eq!(foreground_for(Rgb::new(202, 207, 210)), Rgb::new(0, 0, 0));
    assert_eq!(foreground_for(Rgb::new(217, 27, 11)), Rgb::new(255, 255, 255));
}
