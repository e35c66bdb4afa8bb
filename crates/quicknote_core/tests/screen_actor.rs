mod support;

use quicknote_core::{
    open_notes_screen, AddOutcome, DeleteOutcome, JsonFileStore, NoteStore, NotesConfig,
    NotesScreen, NotesScreenHandle,
};
use support::{note, RecordingStore};

#[tokio::test]
async fn concurrent_deletes_both_take_effect() {
    let store = RecordingStore::with_notes(vec![note("1", "A"), note("2", "B"), note("3", "C")]);
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store.clone()));

    let (first, second) = tokio::join!(handle.delete("1"), handle.delete("2"));

    assert!(matches!(
        first.expect("screen actor should be running"),
        DeleteOutcome::Deleted { removed: true }
    ));
    assert!(matches!(
        second.expect("screen actor should be running"),
        DeleteOutcome::Deleted { removed: true }
    ));
    assert_eq!(
        handle.notes().await.expect("screen actor should be running"),
        vec![note("3", "C")]
    );
    assert_eq!(store.persisted(), vec![note("3", "C")]);
}

#[tokio::test]
async fn concurrent_submits_keep_both_notes_with_distinct_ids() {
    let store = RecordingStore::default();
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store.clone()));

    let (first, second) = tokio::join!(handle.submit("one"), handle.submit("two"));
    let first = match first.expect("screen actor should be running") {
        AddOutcome::Added(note) => note,
        other => panic!("unexpected outcome: {other:?}"),
    };
    let second = match second.expect("screen actor should be running") {
        AddOutcome::Added(note) => note,
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_ne!(first.id, second.id);
    assert_eq!(store.persisted(), vec![first, second]);
}

#[tokio::test]
async fn actor_mounts_once_before_first_command() {
    let store = RecordingStore::with_notes(vec![note("1", "A")]);
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store.clone()));

    let model = handle.render().await.expect("first render");
    handle.render().await.expect("second render");

    assert_eq!(model.rows.len(), 1);
    assert_eq!(store.load_count(), 1);
}

#[tokio::test]
async fn draft_then_add_clears_input() {
    let store = RecordingStore::default();
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store));

    handle
        .set_draft("buy milk")
        .await
        .expect("draft should be set");
    let drafted = handle.render().await.expect("render after draft");
    assert_eq!(drafted.input.value, "buy milk");

    let outcome = handle.add().await.expect("add should reach the actor");
    assert!(matches!(outcome, AddOutcome::Added(_)));
    let model = handle.render().await.expect("render after add");
    assert_eq!(model.input.value, "");
    assert_eq!(model.rows[0].text, "buy milk");
}

#[tokio::test]
async fn blank_submit_is_rejected_without_writing() {
    let store = RecordingStore::default();
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store.clone()));

    let outcome = handle
        .submit(" \n ")
        .await
        .expect("submit should reach the actor");

    assert!(matches!(outcome, AddOutcome::Rejected(_)));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn open_notes_screen_uses_configured_document() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let dir_str = dir.path().to_str().expect("temp dir should be UTF-8");
    let config = NotesConfig::with_notes_dir(dir_str).expect("temp dir should be accepted");
    let handle = open_notes_screen(&config);

    handle
        .submit("persisted")
        .await
        .expect("submit should reach the actor");

    let on_disk = JsonFileStore::from_config(&config)
        .load()
        .await
        .expect("persisted notes should load");
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].text, "persisted");
}

#[tokio::test]
async fn actor_keeps_serving_after_largest_numeric_id_is_loaded() {
    let store = RecordingStore::with_notes(vec![note(&u64::MAX.to_string(), "at max")]);
    let handle = NotesScreenHandle::spawn(NotesScreen::new(store.clone()));

    let outcome = handle
        .submit("after max")
        .await
        .expect("submit should reach the actor");
    assert!(matches!(outcome, AddOutcome::Added(_)));

    let model = handle.render().await.expect("actor should still render");
    assert_eq!(model.rows.len(), 2);
    assert_eq!(store.persisted().len(), 2);
}
