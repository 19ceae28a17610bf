use local_storage::{
    LocalStorage, PlatformStore, SqliteStore, StorageError, StoreConfiguration, StoreError,
    StoredValue,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WindowState {
    x: i32,
    y: i32,
    maximized: bool,
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let state = WindowState {
        x: -20,
        y: 40,
        maximized: false,
    };

    {
        let storage: LocalStorage =
            LocalStorage::open(StoreConfiguration::sqlite(dir.path(), "prefs")).unwrap();
        storage.set_codable("window", &state);
        storage.set_raw(Some(true.into()), "onboarded");
        storage.set_raw(Some("dark".into()), "theme");
    }

    let storage: LocalStorage =
        LocalStorage::open(StoreConfiguration::sqlite(dir.path(), "prefs")).unwrap();

    assert_eq!(storage.get_decodable::<WindowState>("window"), Some(state));
    assert!(storage.get_bool("onboarded"));
    assert_eq!(storage.get_string("theme"), Some("dark".to_owned()));
    assert!(dir.path().join("prefs.sqlite").exists());
}

#[test]
fn test_cleared_value_stays_cleared_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.sqlite");

    {
        let store = SqliteStore::open(&path, "standard").unwrap();
        store
            .set_value("token", Some(StoredValue::from("abc")))
            .unwrap();
        store.set_value("token", None).unwrap();
    }

    let store = SqliteStore::open(&path, "standard").unwrap();
    assert_eq!(store.get_value("token").unwrap(), None);
}

#[test]
fn test_suites_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let open = |suite: &str| -> LocalStorage {
        LocalStorage::open(StoreConfiguration::Sqlite {
            folder_path: dir.path().to_path_buf(),
            db_name: "prefs".to_owned(),
            suite: suite.to_owned(),
        })
        .unwrap()
    };

    let standard = open("standard");
    let group = open("group_shared");

    standard.set_raw(Some("standard".into()), "theme");
    group.set_raw(Some("group".into()), "theme");

    assert_eq!(standard.get_string("theme"), Some("standard".to_owned()));
    assert_eq!(group.get_string("theme"), Some("group".to_owned()));
}

#[test]
fn test_invalid_suite_rejected_at_open() {
    let dir = tempfile::tempdir().unwrap();

    let result = LocalStorage::<str>::open(StoreConfiguration::Sqlite {
        folder_path: dir.path().to_path_buf(),
        db_name: "prefs".to_owned(),
        suite: "bad-suite".to_owned(),
    });

    assert!(matches!(
        result,
        Err(StorageError::Store(StoreError::InvalidSuiteName(name))) if name == "bad-suite"
    ));
}

#[test]
fn test_memory_configuration_does_not_persist() {
    let first: LocalStorage = LocalStorage::open(StoreConfiguration::Memory).unwrap();
    first.set_raw(Some(true.into()), "onboarded");

    let second: LocalStorage = LocalStorage::open(StoreConfiguration::Memory).unwrap();
    assert!(first.get_bool("onboarded"));
    assert!(!second.get_bool("onboarded"));
}
