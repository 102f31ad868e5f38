//! JSON import/export module for flashcards.
//! Files use the same layout as the stored collection: an array of cards.

use crate::models::Flashcard;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exports cards to a pretty-printed JSON file at the specified path.
pub fn export_cards(cards: &[Flashcard], path: &Path) -> Result<(), TransferError> {
    let json_string = serde_json::to_string_pretty(cards)?;
    fs::write(path, json_string)?;
    tracing::info!("Exported {} flashcards to '{}'", cards.len(), path.display());
    Ok(())
}

/// Imports cards from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_cards(path: &Path) -> Result<Vec<Flashcard>, TransferError> {
    let contents = fs::read_to_string(path)?;
    let cards: Vec<Flashcard> = serde_json::from_str(&contents)?;

    tracing::info!("Read {} flashcards from '{}'", cards.len(), path.display());
    Ok(cards)
}
