pub mod db;

pub use db::{CardRepository, SqliteRepository, StorageError};
