//! Snapshot schema.

use chrono::{DateTime, Utc};
use pb_model::{Connection, Equipment, Group, HistoryEntry, Label, Layer};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

/// Everything persisted for one diagram.
///
/// Every collection defaults to empty so files from older editors load;
/// unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Empty snapshot holding only the default layer.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            equipment: Vec::new(),
            history: Vec::new(),
            connections: Vec::new(),
            groups: Vec::new(),
            labels: Vec::new(),
            layers: vec![Layer::default_layer()],
            last_saved: None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}
