//! Equipment import from attribute sets extracted out of third-party
//! diagram files.

use std::collections::{BTreeMap, HashSet};

use pb_model::{Equipment, EquipmentType};
use tracing::debug;

use crate::schema::Snapshot;

/// Attribute name to value, as read from one diagram element.
pub type AttributeSet = BTreeMap<String, String>;

const TYPE_KEYS: [&str; 3] = ["equipment_type", "equipmentType", "type"];
const NAME_KEYS: [&str; 4] = ["equipment_name", "equipmentName", "label", "value"];
const NORMAL_POSITION_KEYS: [&str; 2] = ["normal_position", "normalPosition"];

/// First non-blank value among `keys`.
fn first_attr<'a>(record: &'a AttributeSet, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

fn number(record: &AttributeSet, key: &str, default: f64) -> f64 {
    record
        .get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Build equipment from attribute sets.
///
/// Records without a recognizable equipment type are skipped. When two
/// records share an id the first one wins.
pub fn import_equipment(records: &[AttributeSet]) -> Vec<Equipment> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(type_text) = first_attr(record, &TYPE_KEYS) else {
            continue;
        };
        let Some(equipment_type) = EquipmentType::parse(type_text) else {
            debug!(index, type_text, "skipping record with unknown equipment type");
            continue;
        };

        let id = first_attr(record, &["id"])
            .map(str::to_string)
            .unwrap_or_else(|| format!("equipment-{index}"));
        if !seen.insert(id.clone()) {
            debug!(%id, "skipping duplicate equipment id");
            continue;
        }

        let name = first_attr(record, &NAME_KEYS)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{index}", type_text.to_lowercase()));
        let normal = first_attr(record, &NORMAL_POSITION_KEYS)
            .unwrap_or(equipment_type.default_normal_position())
            .to_string();

        let mut equipment = Equipment::new(id, name, equipment_type);
        equipment.normal_position = normal.clone();
        equipment.current_position = normal;
        equipment.x = number(record, "x", 0.0);
        equipment.y = number(record, "y", 0.0);
        equipment.width = number(record, "width", 50.0);
        equipment.height = number(record, "height", 50.0);
        out.push(equipment);
    }

    out
}

/// Fresh snapshot holding the imported equipment.
pub fn import_snapshot(project_name: impl Into<String>, records: &[AttributeSet]) -> Snapshot {
    let mut snapshot = Snapshot::new(project_name);
    snapshot.equipment = import_equipment(records);
    snapshot
}
