//! Snapshot stores used for auto-save and reopening.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::info;

use crate::schema::Snapshot;
use crate::{ProjectResult, load_json, load_yaml, save_json, save_yaml};

/// Somewhere a snapshot can be written to and read back from.
pub trait SnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> ProjectResult<()>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> ProjectResult<Option<Snapshot>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// YAML for `.yaml` / `.yml`, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

/// A single snapshot file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    format: FileFormat,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &Snapshot) -> ProjectResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        match self.format {
            FileFormat::Json => save_json(&self.path, snapshot)?,
            FileFormat::Yaml => save_yaml(&self.path, snapshot)?,
        }
        info!(path = %self.path.display(), equipment = snapshot.equipment.len(), "saved snapshot");
        Ok(())
    }

    fn load(&self) -> ProjectResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let snapshot = match self.format {
            FileFormat::Json => load_json(&self.path)?,
            FileFormat::Yaml => load_yaml(&self.path)?,
        };
        info!(path = %self.path.display(), equipment = snapshot.equipment.len(), "loaded snapshot");
        Ok(Some(snapshot))
    }
}

/// In-memory store. Clones share the same slot, so a test can keep one
/// handle and give another to an editor.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Snapshot>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(snapshot);
        store
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.slot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, snapshot: &Snapshot) -> ProjectResult<()> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> ProjectResult<Option<Snapshot>> {
        Ok(self.slot.borrow().clone())
    }
}
