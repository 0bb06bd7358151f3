use pb_history::Command;
use tracing::{debug, info};

use super::DiagramController;
use crate::commands::{self, DiagramCommand};
use crate::diagram::{Entity, EntityKind};
use crate::selection::PastePlacement;

impl DiagramController {
    /// Copy the selected equipment and the connections among them.
    /// Returns how many items were copied.
    pub fn copy(&mut self) -> usize {
        let selected = self.selection.equipment_ids();
        let count = self.clipboard.copy(
            self.diagram
                .equipment
                .iter()
                .filter(|e| selected.contains(&e.id)),
            &self.diagram.connections,
        );
        if count == 0 {
            debug!("nothing selected to copy");
        }
        count
    }

    /// Insert fresh copies of the clipboard on the active layer and select
    /// them. Returns the new equipment ids, empty when the clipboard is.
    pub fn paste(&mut self, placement: PastePlacement) -> Vec<String> {
        let Some(batch) = self.clipboard.paste(placement) else {
            debug!("clipboard is empty");
            return Vec::new();
        };

        let mut steps: Vec<DiagramCommand> = Vec::new();
        let mut ids = Vec::with_capacity(batch.equipment.len());
        for mut equipment in batch.equipment {
            equipment.layer_id = self.active_layer.clone();
            ids.push(equipment.id.clone());
            steps.push(self.push_pasted(Entity::Equipment(equipment)));
        }
        let connections = batch.connections.len();
        for mut connection in batch.connections {
            connection.layer_id = self.active_layer.clone();
            steps.push(self.push_pasted(Entity::Connection(connection)));
        }

        self.selection.clear();
        for id in &ids {
            self.selection.add(id);
        }
        info!(equipment = ids.len(), connections, "pasted");
        self.record(Command::compound("Paste", steps));
        ids
    }

    fn push_pasted(&mut self, entity: Entity) -> DiagramCommand {
        let index = match entity.kind() {
            EntityKind::Equipment => self.diagram.equipment.len(),
            _ => self.diagram.connections.len(),
        };
        self.diagram.insert_entity(index, entity.clone());
        commands::inserted("Paste item", index, entity)
    }

    /// Ctrl+V: paste centered on the last known cursor, or at the
    /// configured offset when the cursor is unknown.
    pub fn paste_default(&mut self) -> Vec<String> {
        let placement = match self.cursor {
            Some(cursor) => PastePlacement::AtCursor(cursor),
            None => PastePlacement::Offset(self.config.paste_offset, self.config.paste_offset),
        };
        self.paste(placement)
    }

    /// Delete the selected equipment that is not on a locked layer, along
    /// with every connection touching it. One undo step. Returns how many
    /// equipment were removed.
    pub fn delete_selection(&mut self) -> usize {
        let doomed: Vec<String> = self
            .selection
            .equipment_ids()
            .iter()
            .filter(|id| {
                self.diagram
                    .equipment(id)
                    .is_some_and(|e| !self.diagram.is_layer_locked(&e.layer_id))
            })
            .cloned()
            .collect();
        if doomed.is_empty() {
            debug!("nothing deletable selected");
            return 0;
        }

        let touching: Vec<String> = self
            .diagram
            .connections
            .iter()
            .filter(|c| doomed.iter().any(|id| c.touches(id)))
            .map(|c| c.id.clone())
            .collect();

        let mut steps: Vec<DiagramCommand> = Vec::new();
        for id in &touching {
            if let Some((index, entity)) = self.diagram.remove_entity(EntityKind::Connection, id) {
                steps.push(commands::removed("Delete connection", index, entity));
            }
        }
        for id in &doomed {
            if let Some((index, entity)) = self.diagram.remove_entity(EntityKind::Equipment, id) {
                steps.push(commands::removed("Delete equipment", index, entity));
            }
        }

        info!(equipment = doomed.len(), connections = touching.len(), "deleted selection");
        self.record(Command::compound("Delete", steps));
        doomed.len()
    }

    /// Delete key: selected equipment first, then the selected connection,
    /// group or label.
    pub fn delete_current(&mut self) -> bool {
        if self.selection.has_equipment() {
            return self.delete_selection() > 0;
        }
        if let Some(id) = self.selection.connection().map(str::to_string) {
            return self.delete_connection(&id);
        }
        if let Some(id) = self.selection.group().map(str::to_string) {
            return self.delete_group(&id);
        }
        if let Some(id) = self.selection.label().map(str::to_string) {
            return self.delete_label(&id);
        }
        debug!("nothing selected to delete");
        false
    }
}
