//! Load-time backfill for snapshots written by older editors.

use std::collections::HashSet;

use pb_model::{DEFAULT_LAYER_ID, Layer};

use crate::schema::Snapshot;

/// Make sure the default layer exists and every entity points at a known
/// layer. Empty or unknown layer ids are moved to the default layer.
pub fn normalize_layers(snapshot: &mut Snapshot) {
    if !snapshot.layers.iter().any(Layer::is_default) {
        snapshot.layers.insert(0, Layer::default_layer());
    }

    let known: HashSet<String> = snapshot.layers.iter().map(|l| l.id.clone()).collect();
    let fix = |layer_id: &mut String| {
        if !known.contains(layer_id.as_str()) {
            *layer_id = DEFAULT_LAYER_ID.to_string();
        }
    };

    snapshot.equipment.iter_mut().for_each(|e| fix(&mut e.layer_id));
    snapshot.connections.iter_mut().for_each(|c| fix(&mut c.layer_id));
    snapshot.groups.iter_mut().for_each(|g| fix(&mut g.layer_id));
    snapshot.labels.iter_mut().for_each(|l| fix(&mut l.layer_id));
}
