use chrono::Utc;
use pb_core::{Point, Real, new_id};
use pb_geometry::{anchor_offset, snap_anchor_to_grid};
use pb_model::{AnchorPoint, Equipment, EquipmentType, HistoryEntry};
use tracing::{debug, info, warn};

use super::DiagramController;
use crate::commands;
use crate::diagram::Entity;

impl DiagramController {
    /// Place new equipment with its grid anchor snapped near `(x, y)`, the
    /// requested top-left corner. Returns the new id.
    pub fn add_equipment(&mut self, equipment_type: EquipmentType, x: Real, y: Real) -> String {
        let id = new_id();
        let name = format!("{}-{}", equipment_type, self.diagram.equipment.len() + 1);
        let mut equipment = Equipment::new(id.clone(), name, equipment_type);
        let offset = anchor_offset(equipment.rect(), equipment.grid_anchor);
        let top_left = snap_anchor_to_grid(Point::new(x, y), offset, &self.grid);
        equipment.x = top_left.x;
        equipment.y = top_left.y;
        equipment.layer_id = self.active_layer.clone();

        let index = self.diagram.equipment.len();
        self.diagram.equipment.push(equipment.clone());
        info!(%id, kind = %equipment_type, x = top_left.x, y = top_left.y, "equipment added");
        self.record(commands::inserted(
            format!("Add {equipment_type}"),
            index,
            Entity::Equipment(equipment),
        ));
        id
    }

    /// Apply `edit` to a copy of the equipment and record the swap.
    /// Returns false for unknown ids. An edit that changes nothing is not
    /// recorded.
    fn edit_equipment(
        &mut self,
        id: &str,
        description: String,
        edit: impl FnOnce(&mut Equipment),
    ) -> bool {
        let Some(before) = self.diagram.equipment(id).cloned() else {
            debug!(%id, "no such equipment");
            return false;
        };
        let mut after = before.clone();
        edit(&mut after);
        if after == before {
            return true;
        }
        self.diagram.replace_entity(Entity::Equipment(after.clone()));
        self.record(commands::replaced(
            description,
            Entity::Equipment(before),
            Entity::Equipment(after),
        ));
        true
    }

    /// The option from `equipment`'s set matching `position`, ignoring case.
    fn canonical_position(equipment: &Equipment, position: &str) -> Option<&'static str> {
        let position = position.trim();
        equipment
            .position_options()
            .iter()
            .find(|option| option.eq_ignore_ascii_case(position))
            .copied()
    }

    /// Change the operating position and log it. Positions outside the
    /// type's option set are rejected and leave the diagram untouched.
    pub fn set_current_position(&mut self, id: &str, position: &str) -> bool {
        let Some(equipment) = self.diagram.equipment(id) else {
            debug!(%id, "no such equipment");
            return false;
        };
        let Some(position) = Self::canonical_position(equipment, position) else {
            warn!(%id, position, kind = %equipment.equipment_type, "position not allowed, ignored");
            return false;
        };
        if equipment.current_position == position {
            return true;
        }

        let now = Utc::now();
        let entry = HistoryEntry {
            id: new_id(),
            equipment_id: equipment.id.clone(),
            equipment_name: equipment.name.clone(),
            from_position: equipment.current_position.clone(),
            to_position: position.to_string(),
            timestamp: now,
        };
        let description = format!("Set {} to {}", equipment.name, position);
        self.diagram.history_log.insert(0, entry);
        self.diagram.history_log.truncate(self.config.history_log_limit);
        self.edit_equipment(id, description, |e| {
            e.current_position = position.to_string();
            e.last_updated = Some(now);
        })
    }

    pub fn set_normal_position(&mut self, id: &str, position: &str) -> bool {
        let Some(equipment) = self.diagram.equipment(id) else {
            debug!(%id, "no such equipment");
            return false;
        };
        let Some(position) = Self::canonical_position(equipment, position) else {
            warn!(%id, position, kind = %equipment.equipment_type, "normal position not allowed, ignored");
            return false;
        };
        if equipment.normal_position == position {
            return true;
        }
        let description = format!("Set {} normal to {}", equipment.name, position);
        self.edit_equipment(id, description, |e| {
            e.normal_position = position.to_string();
            e.last_updated = Some(Utc::now());
        })
    }

    pub fn set_loto(&mut self, id: &str, is_loto: bool) -> bool {
        let description = if is_loto { "Apply LOTO" } else { "Clear LOTO" };
        self.edit_equipment(id, description.to_string(), |e| e.is_loto = is_loto)
    }

    pub fn rename_equipment(&mut self, id: &str, name: &str) -> bool {
        self.edit_equipment(id, format!("Rename to {name}"), |e| e.name = name.to_string())
    }

    pub fn set_notes(&mut self, id: &str, notes: &str) -> bool {
        self.edit_equipment(id, "Edit notes".to_string(), |e| e.notes = notes.to_string())
    }

    /// Changing the grid anchor does not move the equipment; the new anchor
    /// is used by the next snap.
    pub fn set_equipment_anchors(
        &mut self,
        id: &str,
        grid_anchor: AnchorPoint,
        connection_anchor: AnchorPoint,
    ) -> bool {
        self.edit_equipment(id, "Change anchors".to_string(), |e| {
            e.grid_anchor = grid_anchor;
            e.connection_anchor = connection_anchor;
        })
    }
}
