//! Draft persistence port
//!
//! One durable key holds the JSON-serialized draft, overwritten wholesale on
//! every change and deleted on publish success or on load-time parse
//! failure. Concurrent writers race under last-write-wins; there is no
//! locking or merging.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::draft::Draft;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write draft: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value persistence port for the wizard draft.
///
/// `load` never fails: malformed persisted data is discarded (and the key
/// deleted), yielding the default empty draft. It is never repaired or
/// partially parsed.
pub trait DraftStore: Send + Sync {
    fn load(&self) -> Draft;
    fn save(&self, draft: &Draft) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store: a single JSON file at a fixed path.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Draft {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Draft::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("[STORE] discarding corrupted draft at {:?}: {}", self.path, e);
                if let Err(e) = std::fs::remove_file(&self.path) {
                    warn!("[STORE] failed to delete corrupted draft: {}", e);
                }
                Draft::default()
            }
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(draft)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, used in tests and second-tab race simulations.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the raw stored payload, bypassing serialization.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Draft {
        let mut slot = self.slot.lock().unwrap();
        let raw = match slot.as_ref() {
            Some(raw) => raw,
            None => return Draft::default(),
        };
        match serde_json::from_str(raw) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("[STORE] discarding corrupted in-memory draft: {}", e);
                *slot = None;
                Draft::default()
            }
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        let json = serde_json::to_string(draft)?;
        *self.slot.lock().unwrap() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
