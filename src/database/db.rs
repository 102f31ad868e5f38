//! Database operations for flashcard application
//!
//! The whole card collection lives in a single key-value slot of the `app_state`
//! table, serialized as JSON. Every save overwrites the slot.

use crate::models::Flashcard;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use thiserror::Error;

/// Key of the slot holding the serialized card list
pub const CARDS_KEY: &str = "flashcards";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Persistence contract of the card store: read and overwrite the full collection.
pub trait CardRepository {
    /// Returns an empty list when nothing has been saved yet.
    fn load(&self) -> Result<Vec<Flashcard>>;
    fn save(&self, cards: &[Flashcard]) -> Result<()>;
}

/// Opens (or creates) the SQLite file and makes sure the key-value table exists
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads a raw value from `app_state`
pub fn get_value(key: &str, conn: &Connection) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Writes a raw value to `app_state`, replacing any previous one
pub fn set_value(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: init_database(path)?,
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CardRepository for SqliteRepository {
    fn load(&self) -> Result<Vec<Flashcard>> {
        match get_value(CARDS_KEY, &self.conn)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, cards: &[Flashcard]) -> Result<()> {
        let json = serde_json::to_string(cards)?;
        set_value(CARDS_KEY, &json, &self.conn)
    }
}
