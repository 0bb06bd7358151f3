//! pb-project: persisted snapshot format and its collaborators.
//!
//! Provides:
//! - The snapshot schema with layer backfill and validation
//! - JSON / YAML load and save helpers and snapshot stores
//! - History and equipment export rows (CSV rendering included)
//! - Equipment import from already-extracted attribute sets
//! - A demo project

pub mod demo;
pub mod export;
pub mod import;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod validate;

pub use demo::demo_snapshot;
pub use export::{EquipmentRow, HistoryRow, equipment_csv, equipment_rows, history_csv, history_rows};
pub use import::{AttributeSet, import_equipment, import_snapshot};
pub use normalize::normalize_layers;
pub use schema::*;
pub use store::{FileFormat, JsonFileStore, MemoryStore, SnapshotStore};
pub use validate::{ValidationError, dangling_connections, validate_snapshot};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Snapshot> {
    let content = std::fs::read_to_string(path)?;
    let mut snapshot: Snapshot = serde_yaml::from_str(&content)?;
    normalize_layers(&mut snapshot);
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

pub fn save_yaml(path: &std::path::Path, snapshot: &Snapshot) -> ProjectResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_yaml::to_string(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Snapshot> {
    let content = std::fs::read_to_string(path)?;
    let mut snapshot: Snapshot = serde_json::from_str(&content)?;
    normalize_layers(&mut snapshot);
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

pub fn save_json(path: &std::path::Path, snapshot: &Snapshot) -> ProjectResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}
