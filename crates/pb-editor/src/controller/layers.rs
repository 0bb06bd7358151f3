use pb_core::next_id;
use pb_history::Command;
use pb_model::{DEFAULT_LAYER_ID, Layer};
use tracing::{debug, info, warn};

use super::DiagramController;
use crate::commands::{self, DiagramCommand};
use crate::diagram::{Entity, EntityKind};

impl DiagramController {
    /// Append a layer above all others. Returns its id.
    pub fn add_layer(&mut self, name: &str) -> String {
        let id = next_id("layer-", self.diagram.layers.iter().map(|l| &l.id));
        let order = self.diagram.layers.iter().map(|l| l.order).max().unwrap_or(0) + 1;
        let layer = Layer::new(id.clone(), name, order);
        let index = self.diagram.layers.len();
        self.diagram.layers.push(layer.clone());
        info!(%id, name, "layer added");
        self.record(commands::inserted("Add layer", index, Entity::Layer(layer)));
        id
    }

    /// Delete a layer, moving everything on it to the default layer. The
    /// default layer itself cannot be deleted.
    pub fn delete_layer(&mut self, id: &str) -> bool {
        if id == DEFAULT_LAYER_ID {
            warn!("the default layer cannot be deleted");
            return false;
        }
        if self.diagram.layer(id).is_none() {
            debug!(%id, "no such layer");
            return false;
        }

        let mut moved: Vec<Entity> = Vec::new();
        moved.extend(
            self.diagram
                .equipment
                .iter()
                .filter(|e| e.layer_id == id)
                .cloned()
                .map(Entity::Equipment),
        );
        moved.extend(
            self.diagram
                .connections
                .iter()
                .filter(|c| c.layer_id == id)
                .cloned()
                .map(Entity::Connection),
        );
        moved.extend(
            self.diagram
                .groups
                .iter()
                .filter(|g| g.layer_id == id)
                .cloned()
                .map(Entity::Group),
        );
        moved.extend(
            self.diagram
                .labels
                .iter()
                .filter(|l| l.layer_id == id)
                .cloned()
                .map(Entity::Label),
        );

        let mut steps: Vec<DiagramCommand> = Vec::with_capacity(moved.len() + 1);
        for before in moved {
            let mut after = before.clone();
            match &mut after {
                Entity::Equipment(e) => e.layer_id = DEFAULT_LAYER_ID.to_string(),
                Entity::Connection(c) => c.layer_id = DEFAULT_LAYER_ID.to_string(),
                Entity::Group(g) => g.layer_id = DEFAULT_LAYER_ID.to_string(),
                Entity::Label(l) => l.layer_id = DEFAULT_LAYER_ID.to_string(),
                Entity::Layer(_) => {}
            }
            self.diagram.replace_entity(after.clone());
            steps.push(commands::replaced("Reassign layer", before, after));
        }
        let Some((index, layer)) = self.diagram.remove_entity(EntityKind::Layer, id) else {
            return false;
        };
        steps.push(commands::removed("Delete layer", index, layer));

        if self.active_layer == id {
            self.active_layer = DEFAULT_LAYER_ID.to_string();
        }
        info!(%id, reassigned = steps.len() - 1, "layer deleted");
        self.record(Command::compound("Delete layer", steps));
        true
    }

    pub fn rename_layer(&mut self, id: &str, name: &str) -> bool {
        let Some(before) = self.diagram.layer(id).cloned() else {
            debug!(%id, "no such layer");
            return false;
        };
        if before.name == name {
            return true;
        }
        let mut after = before.clone();
        after.name = name.to_string();
        self.diagram.replace_entity(Entity::Layer(after.clone()));
        self.record(commands::replaced(
            format!("Rename layer to {name}"),
            Entity::Layer(before),
            Entity::Layer(after),
        ));
        true
    }

    /// Flip visibility. Not undoable; hidden entities are filtered, never
    /// removed.
    pub fn toggle_layer_visibility(&mut self, id: &str) -> bool {
        let Some(layer) = self.diagram.layers.iter_mut().find(|l| l.id == id) else {
            debug!(%id, "no such layer");
            return false;
        };
        layer.is_visible = !layer.is_visible;
        self.after_change();
        true
    }

    /// Flip the lock. Not undoable.
    pub fn toggle_layer_lock(&mut self, id: &str) -> bool {
        let Some(layer) = self.diagram.layers.iter_mut().find(|l| l.id == id) else {
            debug!(%id, "no such layer");
            return false;
        };
        layer.is_locked = !layer.is_locked;
        self.after_change();
        true
    }

    /// Layer that new equipment, connections, groups and labels go to.
    pub fn set_active_layer(&mut self, id: &str) -> bool {
        if self.diagram.layer(id).is_none() {
            debug!(%id, "no such layer");
            return false;
        }
        self.active_layer = id.to_string();
        true
    }
}
