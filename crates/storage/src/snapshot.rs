//! JSON snapshot of the whole deck list.

use flashdeck_core::model::Deck;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::StorageError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    decks: Vec<Deck>,
}

/// Reads and writes decks to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored deck. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::Serialization` if its content is not a valid snapshot.
    pub fn load(&self) -> Result<Vec<Deck>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let file: SnapshotFile =
            serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
        log::debug!(
            "loaded {} decks from {}",
            file.decks.len(),
            self.path.display()
        );
        Ok(file.decks)
    }

    /// Write `decks`, replacing the previous snapshot.
    ///
    /// The file is written next to the target and renamed over it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on filesystem failures.
    pub fn save(&self, decks: &[Deck]) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = SnapshotFile {
            decks: decks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        log::debug!("saved {} decks to {}", decks.len(), self.path.display());
        Ok(())
    }
}
