use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::OptionalExtension;

use super::{PlatformStore, StoreError};
use crate::{validate_suite_name, StoredValue};

/// A [`PlatformStore`] persisted in a SQLite database file.
///
/// Each suite is a table of `key TEXT PRIMARY KEY, value TEXT NOT NULL`, where `value` is the
/// JSON rendering of a [`StoredValue`]. Several suites can share one file.
#[derive(Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<rusqlite::Connection>>,
    suite: String,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("suite", &self.suite)
            .finish()
    }
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and the table for `suite`.
    pub fn open(path: impl AsRef<Path>, suite: &str) -> Result<Self, StoreError> {
        Self::initialize(rusqlite::Connection::open(path)?, suite)
    }

    /// Opens a database that lives only as long as the returned store.
    pub fn open_in_memory(suite: &str) -> Result<Self, StoreError> {
        Self::initialize(rusqlite::Connection::open_in_memory()?, suite)
    }

    fn initialize(mut connection: rusqlite::Connection, suite: &str) -> Result<Self, StoreError> {
        // The suite is interpolated as a table name, it can't be bound as a parameter.
        if !validate_suite_name(suite) {
            return Err(StoreError::InvalidSuiteName(suite.to_owned()));
        }

        // Set WAL mode for better concurrency
        connection.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;

        let transaction = connection.transaction()?;
        transaction.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS \"{suite}\" (key TEXT PRIMARY KEY, value TEXT NOT NULL);"
            ),
            [],
        )?;
        transaction.commit()?;

        Ok(SqliteStore {
            connection: Arc::new(Mutex::new(connection)),
            suite: suite.to_owned(),
        })
    }
}

impl PlatformStore for SqliteStore {
    fn get_value(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let conn = self
            .connection
            .lock()
            .expect("Mutex should not be poisoned");

        let value = conn
            .query_row(
                &format!("SELECT value FROM \"{}\" WHERE key = ?1", self.suite),
                rusqlite::params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    fn set_value(&self, key: &str, value: Option<StoredValue>) -> Result<(), StoreError> {
        let mut conn = self
            .connection
            .lock()
            .expect("Mutex should not be poisoned");
        let transaction = conn.transaction()?;

        match value {
            Some(value) => {
                let value = serde_json::to_string(&value)?;
                transaction.execute(
                    &format!(
                        "INSERT OR REPLACE INTO \"{}\" (key, value) VALUES (?1, ?2)",
                        self.suite
                    ),
                    rusqlite::params![key, value],
                )?;
            }
            None => {
                transaction.execute(
                    &format!("DELETE FROM \"{}\" WHERE key = ?1", self.suite),
                    rusqlite::params![key],
                )?;
            }
        }

        transaction.commit()?;
        Ok(())
    }
}
