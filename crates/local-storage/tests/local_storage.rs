use std::{fmt, sync::Arc};

use local_storage::{
    register_storage_key, LocalStorage, MemoryStore, PlatformStore, SqliteStore, StoredValue,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    email: String,
    vault_timeout: Option<u32>,
    favorites: Vec<String>,
}

fn account() -> Account {
    Account {
        email: "user@example.com".to_owned(),
        vault_timeout: Some(15),
        favorites: vec!["github".to_owned(), "mail".to_owned()],
    }
}

#[derive(Debug, Clone, Copy)]
enum AppKey {
    Account,
    Theme,
    Onboarded,
}

impl fmt::Display for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppKey::Account => f.write_str("account"),
            AppKey::Theme => f.write_str("theme"),
            AppKey::Onboarded => f.write_str("onboarded"),
        }
    }
}

register_storage_key!(AppKey);

/// Every backend available on this target, so each property is checked against all of them.
fn stores() -> Vec<Arc<dyn PlatformStore>> {
    vec![
        Arc::new(MemoryStore::new()),
        Arc::new(SqliteStore::open_in_memory("standard").unwrap()),
    ]
}

#[test]
fn test_never_written_key_reads_as_absent() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);
        let fallback = account();

        assert_eq!(storage.get_raw(&AppKey::Account), None);
        assert!(!storage.get_bool(&AppKey::Account));
        assert_eq!(storage.get_string(&AppKey::Account), None);
        assert_eq!(storage.get_decodable::<Account>(&AppKey::Account), None);
        assert_eq!(
            storage.get_decodable_or(&AppKey::Account, fallback.clone()),
            fallback
        );
    }
}

#[test]
fn test_codable_round_trip() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);

        storage.set_codable(&AppKey::Account, &account());
        assert_eq!(
            storage.get_decodable::<Account>(&AppKey::Account),
            Some(account())
        );

        let other = Account {
            email: "other@example.com".to_owned(),
            vault_timeout: None,
            favorites: Vec::new(),
        };
        assert_eq!(
            storage.get_decodable_or(&AppKey::Account, other),
            account()
        );
    }
}

#[test]
fn test_codable_overwrite() {
    for store in stores() {
        let storage: LocalStorage = LocalStorage::new(store);

        storage.set_codable("favorites", &vec!["a", "b"]);
        storage.set_codable("favorites", &vec!["c"]);

        assert_eq!(
            storage.get_decodable::<Vec<String>>("favorites"),
            Some(vec!["c".to_owned()])
        );
    }
}

#[test]
fn test_raw_bool_is_not_decodable() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);

        storage.set_raw(Some(true.into()), &AppKey::Account);

        assert_eq!(storage.get_decodable::<Account>(&AppKey::Account), None);
        assert_eq!(
            storage.get_decodable_or(&AppKey::Account, account()),
            account()
        );
    }
}

#[test]
fn test_undecodable_bytes_fall_back() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);

        storage.set_codable(&AppKey::Account, &"just a string");

        assert_eq!(storage.get_decodable::<Account>(&AppKey::Account), None);
        assert_eq!(
            storage.get_decodable::<String>(&AppKey::Account),
            Some("just a string".to_owned())
        );
    }
}

#[test]
fn test_coercion_defaults() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);

        storage.set_raw(Some("yes".into()), &AppKey::Onboarded);
        storage.set_raw(Some(StoredValue::Integer(1)), &AppKey::Theme);

        assert!(!storage.get_bool(&AppKey::Onboarded));
        assert_eq!(storage.get_string(&AppKey::Theme), None);

        storage.set_raw(Some(true.into()), &AppKey::Onboarded);
        storage.set_raw(Some("dark".into()), &AppKey::Theme);

        assert!(storage.get_bool(&AppKey::Onboarded));
        assert_eq!(storage.get_string(&AppKey::Theme), Some("dark".to_owned()));
    }
}

#[test]
fn test_codable_bytes_are_raw_bytes() {
    for store in stores() {
        let storage: LocalStorage = LocalStorage::new(store);

        storage.set_codable("zoom", &2);

        assert_eq!(
            storage.get_raw("zoom"),
            Some(StoredValue::Bytes(b"2".to_vec()))
        );
        assert!(!storage.get_bool("zoom"));
        assert_eq!(storage.get_string("zoom"), None);
    }
}

#[test]
fn test_null_write_clears() {
    for store in stores() {
        let storage: LocalStorage<AppKey> = LocalStorage::new(store);

        storage.set_raw(Some("dark".into()), &AppKey::Theme);
        assert!(storage.get_raw(&AppKey::Theme).is_some());

        storage.set_raw(None, &AppKey::Theme);
        assert_eq!(storage.get_raw(&AppKey::Theme), None);
        assert_eq!(storage.get_string(&AppKey::Theme), None);
    }
}

#[test]
fn test_equal_renderings_share_a_slot() {
    for store in stores() {
        let by_enum: LocalStorage<AppKey> = LocalStorage::new(store);
        let by_string = by_enum.with_key::<String>();

        by_enum.set_codable(&AppKey::Account, &account());
        assert_eq!(
            by_string.get_decodable::<Account>(&"account".to_owned()),
            Some(account())
        );

        by_string.set_raw(Some(true.into()), &"onboarded".to_owned());
        assert!(by_enum.get_bool(&AppKey::Onboarded));
    }
}

#[test]
fn test_every_call_reaches_the_store() {
    let storage: LocalStorage = LocalStorage::in_memory();

    storage.set_raw(Some(StoredValue::Float(1.5)), "scale");
    storage
        .store()
        .set_value("scale", Some(StoredValue::Float(2.0)))
        .unwrap();

    assert_eq!(storage.get_raw("scale"), Some(StoredValue::Float(2.0)));
}

#[test]
fn test_non_finite_floats_read_back() {
    for store in stores() {
        let storage: LocalStorage = LocalStorage::new(store);

        storage.try_set_raw(Some(f64::INFINITY.into()), "scale").unwrap();
        assert_eq!(
            storage.get_raw("scale"),
            Some(StoredValue::Float(f64::INFINITY))
        );

        storage
            .try_set_raw(Some(f64::NEG_INFINITY.into()), "offset")
            .unwrap();
        assert_eq!(
            storage.get_raw("offset"),
            Some(StoredValue::Float(f64::NEG_INFINITY))
        );

        storage.try_set_raw(Some(f64::NAN.into()), "ratio").unwrap();
        assert!(matches!(
            storage.try_get_raw("ratio").unwrap(),
            Some(StoredValue::Float(f)) if f.is_nan()
        ));
    }
}
