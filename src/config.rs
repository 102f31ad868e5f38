//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_DATABASE_PATH: &str = "db.sqlite3";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Layout of config.toml; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    openai: Option<OpenAiSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiSection {
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Example generation is only offered when this is set.
    pub openai: Option<OpenAiConfig>,
}

impl AppConfig {
    /// Reads config.toml from the working directory and the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        let file = match read_file_config(Path::new(CONFIG_FILE)) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", CONFIG_FILE, e);
                FileConfig::default()
            }
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = file
            .database
            .and_then(|db| db.path)
            .or_else(|| env("FLASHCARDS_DB_PATH"))
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        tracing::info!("Using database at {}", database_path);

        let openai_file = file.openai.unwrap_or_default();
        let api_key = openai_file
            .api_key
            .or_else(|| env("OPENAI_API_KEY"))
            .filter(|key| !key.trim().is_empty());
        let model = openai_file
            .model
            .or_else(|| env("OPENAI_MODEL"))
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

        Self {
            database_path: PathBuf::from(database_path),
            openai: api_key.map(|api_key| OpenAiConfig { api_key, model }),
        }
    }
}

/// A missing file is not an error; a malformed one is.
fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}
