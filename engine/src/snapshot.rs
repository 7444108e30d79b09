//! Encounter snapshot persistence.
//!
//! The transport is a plain key-value record store; the engine only needs
//! read-by-key and write-by-key. One encounter is active at a time, so the
//! whole state serializes under a single well-known key and every save
//! overwrites the previous snapshot.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::encounter::Encounter;

pub const ENCOUNTER_KEY: &str = "currentCombat";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O: {0}")]
    Io(#[from] io::Error),
    #[error("record encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Minimal key-value transport behind roster and snapshot persistence.
pub trait RecordStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One JSON file per key under a data directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStore for DirStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemStore {
    records: HashMap<String, String>,
}

impl RecordStore for MemStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn save_encounter<S: RecordStore>(store: &mut S, encounter: &Encounter) -> Result<(), StoreError> {
    let text = serde_json::to_string(encounter)?;
    store.write(ENCOUNTER_KEY, &text)
}

/// Missing snapshot reads back as a fresh, empty encounter.
pub fn load_encounter<S: RecordStore>(store: &S) -> Result<Encounter, StoreError> {
    match store.read(ENCOUNTER_KEY)? {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(Encounter::default()),
    }
}

/// The "reset battle" operation: overwrite the snapshot with an empty
/// encounter (no combatants, turn 0, empty log, no current actor).
pub fn clear_encounter<S: RecordStore>(store: &mut S) -> Result<(), StoreError> {
    save_encounter(store, &Encounter::default())
}
