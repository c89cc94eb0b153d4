use std::fs;

use jsonmend_core::{
    BatchSummary, FileOutcome, SENTINEL_FILE_NAME, is_parseable, sanitize_file, sanitize_tree,
};

#[test]
fn sanitize_file_outcomes() {
    let dir = tempfile::tempdir().unwrap();

    let valid = dir.path().join("valid.json");
    fs::write(&valid, r#"{"n": 1}"#).unwrap();
    assert_eq!(sanitize_file(&valid, false), FileOutcome::Unchanged);
    assert_eq!(fs::read_to_string(&valid).unwrap(), r#"{"n": 1}"#);

    let fixable = dir.path().join("fixable.json");
    fs::write(&fixable, "```json\n{\"ok\": true}\n```").unwrap();
    assert_eq!(sanitize_file(&fixable, false), FileOutcome::Altered);
    assert!(is_parseable(&fs::read_to_string(&fixable).unwrap()));

    // Without the delete flag the broken file is left on disk
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "no json anywhere in this file").unwrap();
    assert_eq!(sanitize_file(&broken, false), FileOutcome::Deleted);
    assert!(broken.exists());

    // With it, the file is removed
    assert_eq!(sanitize_file(&broken, true), FileOutcome::Deleted);
    assert!(!broken.exists());
}

#[test]
fn tree_walk_counts_and_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("nested");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("a.json"), r#"{"a": 1}"#).unwrap();
    fs::write(dir.path().join("b.json"), "[1, 2, 3]").unwrap();
    fs::write(sub.join("c.json"), r#"{"c": true}"#).unwrap();
    fs::write(sub.join("fenced.json"), "```json\n{\"ok\": 1}\n```").unwrap();
    let garbage = sub.join("garbage.json");
    fs::write(&garbage, "pure prose, nothing recoverable").unwrap();

    let summary = sanitize_tree(dir.path(), true).expect("walk");
    assert_eq!(summary, BatchSummary { altered: 1, deleted: 1, valid: 4 });
    assert!(!garbage.exists(), "unrepairable file is deleted");
    assert!(is_parseable(&fs::read_to_string(sub.join("fenced.json")).unwrap()));
}

#[test]
fn rerun_on_repaired_tree_is_all_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"a": 1,}"#).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"b": 2}"#).unwrap();

    let first = sanitize_tree(dir.path(), false).expect("walk");
    assert_eq!(first, BatchSummary { altered: 1, deleted: 0, valid: 2 });

    let second = sanitize_tree(dir.path(), false).expect("walk");
    assert_eq!(second, BatchSummary { altered: 0, deleted: 0, valid: 2 });
}

#[test]
fn sentinel_file_is_never_touched_or_counted() {
    let dir = tempfile::tempdir().unwrap();
    let sentinel = dir.path().join(SENTINEL_FILE_NAME);
    fs::write(&sentinel, "utterly invalid content, would otherwise be deleted").unwrap();
    fs::write(dir.path().join("a.json"), r#"{"a": 1}"#).unwrap();

    let summary = sanitize_tree(dir.path(), true).expect("walk");
    assert_eq!(summary, BatchSummary { altered: 0, deleted: 0, valid: 1 });
    assert_eq!(
        fs::read_to_string(&sentinel).unwrap(),
        "utterly invalid content, would otherwise be deleted"
    );
}

#[test]
fn missing_root_is_a_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("does-not-exist");
    assert!(sanitize_tree(&gone, false).is_err());
}
