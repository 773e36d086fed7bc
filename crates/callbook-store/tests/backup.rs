use callbook_store::error::StoreError;
use callbook_store::repo::PatientNew;
use callbook_store::Store;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn backup_creates_readable_snapshot() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("callbook.sqlite3");
    let backup_path = temp.path().join("backup.sqlite3");

    let store = Store::open(&db_path).expect("open store");
    store.migrate().expect("migrate");

    store
        .patients()
        .create(
            1_700_000_000,
            PatientNew {
                name: "Susan Everyteen".to_string(),
                primary_phone: "123-123-1234".to_string(),
            },
        )
        .expect("create patient");

    store.backup_to(&backup_path).expect("backup");
    assert!(backup_path.exists());

    let backup = Store::open(&backup_path).expect("open backup");
    let patients = backup.patients().list_all().expect("list patients");
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].name, "Susan Everyteen");
}

#[test]
fn backup_rejects_database_path() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("callbook.sqlite3");
    let store = Store::open(&db_path).expect("open store");
    store.migrate().expect("migrate");

    let err = store.backup_to(&db_path).expect_err("backup should fail");
    assert!(matches!(err, StoreError::InvalidBackupPath(_)));
}

#[test]
fn backup_rejects_sidecar_paths() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("callbook.sqlite3");
    let store = Store::open(&db_path).expect("open store");
    store.migrate().expect("migrate");

    let wal_path = PathBuf::from(format!("{}-wal", db_path.display()));
    let err = store.backup_to(&wal_path).expect_err("backup should fail");
    assert!(matches!(err, StoreError::InvalidBackupPath(_)));
}
