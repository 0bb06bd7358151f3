//! Position change log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded change of an equipment's current position.
///
/// The equipment name is captured at the time of the change so the log
/// stays readable after renames and deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub equipment_id: String,
    pub equipment_name: String,
    #[serde(default)]
    pub from_position: String,
    #[serde(default)]
    pub to_position: String,
    pub timestamp: DateTime<Utc>,
}
