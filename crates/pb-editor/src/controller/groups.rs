use pb_core::new_id;
use pb_geometry::{group_bounds, membership};
use pb_model::Group;
use tracing::{debug, info};

use super::DiagramController;
use crate::commands;
use crate::diagram::{Entity, EntityKind};

impl DiagramController {
    /// Wrap the selected equipment in a new group. Needs at least two
    /// selected items. The new group becomes the selection.
    pub fn create_group(&mut self) -> Option<String> {
        let selected = self.selection.equipment_ids();
        if selected.len() < 2 {
            debug!(selected = selected.len(), "a group needs at least two items");
            return None;
        }
        let rects = self
            .diagram
            .equipment
            .iter()
            .filter(|e| selected.contains(&e.id))
            .map(|e| e.rect());
        let bounds = group_bounds(rects, self.config.group_padding)?;

        let id = new_id();
        let mut group = Group::new(
            id.clone(),
            format!("Group {}", self.diagram.groups.len() + 1),
            bounds,
        );
        group.layer_id = self.active_layer.clone();
        group.equipment_ids = membership(&group, &self.diagram.equipment);

        let index = self.diagram.groups.len();
        self.diagram.groups.push(group.clone());
        self.selection.select_group(&id);
        info!(%id, members = group.equipment_ids.len(), "group created");
        self.record(commands::inserted("Create group", index, Entity::Group(group)));
        Some(id)
    }

    pub fn rename_group(&mut self, id: &str, name: &str) -> bool {
        let Some(before) = self.diagram.group(id).cloned() else {
            debug!(%id, "no such group");
            return false;
        };
        if before.name == name {
            return true;
        }
        let mut after = before.clone();
        after.name = name.to_string();
        self.diagram.replace_entity(Entity::Group(after.clone()));
        self.record(commands::replaced(
            format!("Rename group to {name}"),
            Entity::Group(before),
            Entity::Group(after),
        ));
        true
    }

    /// Remove the group frame. Member equipment stays.
    pub fn delete_group(&mut self, id: &str) -> bool {
        let Some((index, entity)) = self.diagram.remove_entity(EntityKind::Group, id) else {
            debug!(%id, "no such group");
            return false;
        };
        self.record(commands::removed("Delete group", index, entity));
        true
    }
}
