use colornote_core::{
    list_all_notes, BoardError, JsonNoteRepository, Note, NoteBoard, NoteRepository, Rgb,
    StoreConfig, DEFAULT_NOTE_COLOR,
};
use std::path::Path;

fn open_board(dir: &Path) -> NoteBoard<JsonNoteRepository> {
    NoteBoard::load(JsonNoteRepository::new(StoreConfig::new(dir))).unwrap()
}

fn titles<R: NoteRepository>(board: &NoteBoard<R>) -> Vec<String> {
    board.notes().iter().map(|note| note.title().to_string()).collect()
}

#[test]
fn swapping_two_new_notes_persists_dense_order() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());

    let a = board.create_note("A").unwrap();
    let b = board.create_note("B").unwrap();

    board.move_note(1, 0).unwrap();

    let reloaded = open_board(temp.path());
    assert_eq!(titles(&reloaded), ["B", "A"]);
    assert_eq!(reloaded.get(&b).unwrap().order(), 0);
    assert_eq!(reloaded.get(&a).unwrap().order(), 1);
}

#[test]
fn note_created_after_reorder_reloads_at_the_end() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    board.create_note("A").unwrap();
    board.create_note("B").unwrap();
    board.move_note(1, 0).unwrap();

    let c = board.create_note("C").unwrap();
    assert_eq!(titles(&board), ["B", "A", "C"]);
    assert_eq!(board.get(&c).unwrap().explicit_order(), Some(2));

    let reloaded = list_all_notes(&StoreConfig::new(temp.path())).unwrap();
    let reloaded_titles: Vec<&str> = reloaded.iter().map(Note::title).collect();
    assert_eq!(reloaded_titles, ["B", "A", "C"]);
}

#[test]
fn create_note_uses_default_color_and_saves_immediately() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());

    let id = board.create_note("fresh").unwrap();
    let path = board.repository().record_path(&id);
    assert!(path.exists());

    let reloaded = open_board(temp.path());
    assert_eq!(reloaded.get(&id).unwrap().color(), Some(DEFAULT_NOTE_COLOR));
    assert_eq!(reloaded.foreground_for(&id).unwrap(), Rgb::WHITE);
}

#[test]
fn rename_edit_and_recolor_are_persisted() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    let id = board.create_note("draft").unwrap();

    board.rename(&id, "final").unwrap();
    board.edit_content(&id, "body text").unwrap();
    board.recolor(&id, Rgb::LIGHT_GRAY).unwrap();

    let reloaded = open_board(temp.path());
    let note = reloaded.get(&id).unwrap();
    assert_eq!(note.title(), "final");
    assert_eq!(note.content(), "body text");
    assert_eq!(note.color(), Some(Rgb::LIGHT_GRAY));
    assert_eq!(reloaded.foreground_for(&id).unwrap(), Rgb::BLACK);
}

#[test]
fn delete_removes_note_and_renumbers_survivors() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    let first = board.create_note("first").unwrap();
    board.create_note("second").unwrap();
    board.create_note("third").unwrap();

    assert!(board.delete(&first).unwrap());
    assert!(!board.repository().record_path(&first).exists());

    let reloaded = open_board(temp.path());
    assert_eq!(titles(&reloaded), ["second", "third"]);
    let orders: Vec<u64> = reloaded.notes().iter().map(Note::order).collect();
    assert_eq!(orders, [0, 1]);
}

#[test]
fn delete_of_note_whose_record_vanished_keeps_it_on_board() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    let id = board.create_note("ghost").unwrap();
    std::fs::remove_file(board.repository().record_path(&id)).unwrap();

    assert!(!board.delete(&id).unwrap());
    assert_eq!(board.len(), 1);
}

#[test]
fn reorder_applies_full_permutation() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    let a = board.create_note("a").unwrap();
    let b = board.create_note("b").unwrap();
    let c = board.create_note("c").unwrap();

    board.reorder(&[c.clone(), a.clone(), b.clone()]).unwrap();
    assert_eq!(titles(&board), ["c", "a", "b"]);

    let err = board.reorder(&[a.clone(), a, b]).unwrap_err();
    assert!(matches!(err, BoardError::ReorderMismatch { expected: 3 }));
    assert_eq!(titles(&open_board(temp.path())), ["c", "a", "b"]);
}

#[test]
fn close_flushes_order_for_notes_never_reordered() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    board.create_note("one").unwrap();
    board.create_note("two").unwrap();

    board.close().unwrap();

    let reloaded = open_board(temp.path());
    let orders: Vec<u64> = reloaded.notes().iter().map(Note::order).collect();
    assert_eq!(orders, [0, 1]);
    assert_eq!(reloaded.notes()[1].explicit_order(), Some(1));
    assert_eq!(titles(&reloaded), ["one", "two"]);
}

#[test]
fn reload_discards_unsaved_state() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    board.create_note("persisted").unwrap();

    board.reload().unwrap();
    assert_eq!(titles(&board), ["persisted"]);
}

#[test]
fn unknown_ids_are_reported() {
    let temp = tempfile::tempdir().unwrap();
    let mut board = open_board(temp.path());
    let stranger = Note::new("elsewhere", None);

    assert!(matches!(
        board.edit_content(stranger.id(), "x"),
        Err(BoardError::UnknownNote(_))
    ));
    assert!(matches!(
        board.delete(stranger.id()),
        Err(BoardError::UnknownNote(_))
    ));
}
