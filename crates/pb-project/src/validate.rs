//! Snapshot validation.

use std::collections::HashSet;

use pb_model::{Connection, DEFAULT_LAYER_ID};

use crate::schema::Snapshot;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn check_unique<'a, I>(ids: I, context: &str) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

/// Structural checks that must hold before a snapshot is written or used.
///
/// Connections to missing equipment are not an error here; see
/// [`dangling_connections`].
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), ValidationError> {
    check_unique(snapshot.layers.iter().map(|l| &l.id), "layers")?;
    if !snapshot.layers.iter().any(|l| l.id == DEFAULT_LAYER_ID) {
        return Err(ValidationError::MissingReference {
            id: DEFAULT_LAYER_ID.to_string(),
            context: "layers".to_string(),
        });
    }

    check_unique(snapshot.equipment.iter().map(|e| &e.id), "equipment")?;
    check_unique(snapshot.connections.iter().map(|c| &c.id), "connections")?;
    check_unique(snapshot.groups.iter().map(|g| &g.id), "groups")?;
    check_unique(snapshot.labels.iter().map(|l| &l.id), "labels")?;

    let layer_ids: HashSet<&String> = snapshot.layers.iter().map(|l| &l.id).collect();
    let layer_refs = snapshot
        .equipment
        .iter()
        .map(|e| (&e.layer_id, "equipment layer_id"))
        .chain(snapshot.connections.iter().map(|c| (&c.layer_id, "connection layer_id")))
        .chain(snapshot.groups.iter().map(|g| (&g.layer_id, "group layer_id")))
        .chain(snapshot.labels.iter().map(|l| (&l.layer_id, "label layer_id")));
    for (layer_id, context) in layer_refs {
        if !layer_ids.contains(layer_id) {
            return Err(ValidationError::MissingReference {
                id: layer_id.clone(),
                context: context.to_string(),
            });
        }
    }

    for e in &snapshot.equipment {
        let finite = [e.x, e.y, e.width, e.height].iter().all(|v| v.is_finite());
        if !finite || e.width < 0.0 || e.height < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("equipment {} geometry", e.id),
                value: format!("{},{} {}x{}", e.x, e.y, e.width, e.height),
                reason: "must be finite with non-negative size".to_string(),
            });
        }
    }

    Ok(())
}

/// Connections whose source or target equipment does not exist.
pub fn dangling_connections(snapshot: &Snapshot) -> Vec<&Connection> {
    let ids: HashSet<&str> = snapshot.equipment.iter().map(|e| e.id.as_str()).collect();
    snapshot
        .connections
        .iter()
        .filter(|c| {
            !ids.contains(c.source_equipment_id.as_str())
                || !ids.contains(c.target_equipment_id.as_str())
        })
        .collect()
}
