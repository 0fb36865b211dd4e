use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use std::sync::{Arc, Mutex};

use crate::error::TrackerResult;

pub type DBConnection = Arc<Mutex<Connection>>;

pub const JOBS_KEY: &str = "snaptrack-jobs";
pub const USER_KEY: &str = "snaptrack-user";
pub const CUSTOMERS_KEY: &str = "snaptrack-customers";
pub const CATEGORIES_KEY: &str = "snaptrack-categories";

pub fn create_tables(db_connection: &Connection) -> TrackerResult<()> {
    db_connection.execute(
        "CREATE TABLE IF NOT EXISTS collections (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        params![],
    )?;

    Ok(())
}

/// Reads the record stored under `key`, or `None` if it was never written.
pub fn load_collection<T: DeserializeOwned>(
    key: &str,
    db_connection: &Connection,
) -> TrackerResult<Option<T>> {
    let value: Option<String> = db_connection
        .query_row(
            "SELECT value FROM collections WHERE key = (?1)",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(v) => Ok(Some(serde_json::from_str(&v)?)),
        None => Ok(None),
    }
}

pub fn load_collection_or_default<T: DeserializeOwned + Default>(
    key: &str,
    db_connection: &Connection,
) -> TrackerResult<T> {
    Ok(load_collection(key, db_connection)?.unwrap_or_default())
}

/// Overwrites the record stored under `key`. Last write wins.
pub fn save_collection<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
    db_connection: &Connection,
) -> TrackerResult<()> {
    let value = serde_json::to_string(value)?;

    db_connection.execute(
        "INSERT OR REPLACE INTO collections (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;

    Ok(())
}

/// Runs `writes` in one transaction. Nothing is kept unless every write succeeds.
pub fn in_transaction<T>(
    db_connection: &Connection,
    writes: impl FnOnce(&Connection) -> TrackerResult<T>,
) -> TrackerResult<T> {
    let transaction = db_connection.unchecked_transaction()?;
    let result = writes(&transaction)?;
    transaction.commit()?;

    Ok(result)
}

#[cfg(test)]
pub fn test_connection() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    create_tables(&connection).unwrap();
    connection
}
