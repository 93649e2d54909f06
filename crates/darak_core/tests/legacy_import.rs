use darak_core::db::open_db_in_memory;
use darak_core::{LegacyImportError, LegacyImporter, Record, RecordRepository, SqliteRecordRepository};
use std::fs;
use std::path::PathBuf;

fn write_flat_file(dir: &tempfile::TempDir, payload: &str) -> PathBuf {
    let path = dir.path().join("spacelog_records.json");
    fs::write(&path, payload).unwrap();
    path
}

#[test]
fn migrate_imports_entries_and_removes_the_flat_file() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    // One pre-existing record; the flat file adds two non-colliding ones.
    repo.put(&Record::with_id(5, "2024-01-05", "movie"), None)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_flat_file(
        &dir,
        r#"[
            {"id": 1, "date": "2023-03-01", "category": "movie"},
            {"id": 2, "date": "2023-04-01", "category": "book", "ownerId": "alice"}
        ]"#,
    );

    let importer = LegacyImporter::new(&path, &repo);
    assert_eq!(importer.migrate().unwrap(), 2);
    assert!(!path.exists());

    let all = repo.get_all().unwrap();
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 5]);

    // Legacy entries keep their ownership as-was: absent stays absent.
    assert!(all[0].is_legacy());
    assert_eq!(all[1].owner_id.as_deref(), Some("alice"));
}

#[test]
fn migrate_twice_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_flat_file(&dir, r#"[{"id": 1, "date": "2023-03-01", "category": "movie"}]"#);

    let importer = LegacyImporter::new(&path, &repo);
    assert_eq!(importer.migrate().unwrap(), 1);
    assert_eq!(importer.migrate().unwrap(), 0);

    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn absent_flat_file_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let importer = LegacyImporter::new(dir.path().join("spacelog_records.json"), &repo);
    assert_eq!(importer.migrate().unwrap(), 0);
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn undecodable_entries_are_skipped_but_do_not_block_completion() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_flat_file(
        &dir,
        r#"[
            {"id": 1, "date": "2023-03-01", "category": "movie"},
            {"note": "this is not a record"},
            {"id": 2, "date": "2023-04-01", "category": "book"}
        ]"#,
    );

    let importer = LegacyImporter::new(&path, &repo);
    assert_eq!(importer.migrate().unwrap(), 2);
    assert!(!path.exists());
    assert_eq!(repo.get_all().unwrap().len(), 2);
}

#[test]
fn unparseable_flat_file_is_left_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_flat_file(&dir, "definitely not json");

    let importer = LegacyImporter::new(&path, &repo);
    let err = importer.migrate().unwrap_err();
    assert!(matches!(err, LegacyImportError::Parse(_)));
    assert!(path.exists());
}

#[test]
fn persistence_failure_aborts_and_keeps_the_flat_file() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_flat_file(&dir, r#"[{"id": 1, "date": "2023-03-01", "category": "movie"}]"#);

    // Pull storage out from under the importer to force a put failure.
    conn.execute_batch("DROP TABLE records;").unwrap();

    let importer = LegacyImporter::new(&path, &repo);
    let err = importer.migrate().unwrap_err();
    assert!(matches!(err, LegacyImportError::Storage(_)));
    assert!(path.exists());
}
