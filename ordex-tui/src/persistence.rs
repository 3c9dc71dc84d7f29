//! Persistence for column preferences.

use ordex_core::ColumnPrefs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<ColumnPrefs>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let prefs = serde_json::from_str::<ColumnPrefs>(&contents)?;
    Ok(Some(prefs))
}

pub fn save(path: &Path, prefs: &ColumnPrefs) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(prefs)?;
    std::fs::write(path, contents)?;
    Ok(())
}
