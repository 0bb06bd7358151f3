use pb_core::{Point, Real, new_id};
use pb_geometry::snap_to_grid;
use pb_model::Label;
use tracing::debug;

use super::DiagramController;
use crate::commands;
use crate::diagram::{Entity, EntityKind};

impl DiagramController {
    pub fn add_label(&mut self, text: &str, x: Real, y: Real) -> String {
        let id = new_id();
        let mut label = Label::new(id.clone(), text, snap_to_grid(Point::new(x, y), &self.grid));
        label.layer_id = self.active_layer.clone();
        let index = self.diagram.labels.len();
        self.diagram.labels.push(label.clone());
        self.record(commands::inserted("Add label", index, Entity::Label(label)));
        id
    }

    fn edit_label(&mut self, id: &str, description: &str, edit: impl FnOnce(&mut Label)) -> bool {
        let Some(before) = self.diagram.label(id).cloned() else {
            debug!(%id, "no such label");
            return false;
        };
        let mut after = before.clone();
        edit(&mut after);
        if after == before {
            return true;
        }
        self.diagram.replace_entity(Entity::Label(after.clone()));
        self.record(commands::replaced(
            description,
            Entity::Label(before),
            Entity::Label(after),
        ));
        true
    }

    pub fn move_label(&mut self, id: &str, x: Real, y: Real) -> bool {
        if let Some(label) = self.diagram.label(id) {
            if self.diagram.is_layer_locked(&label.layer_id) {
                debug!(%id, "label is on a locked layer");
                return false;
            }
        }
        let at = snap_to_grid(Point::new(x, y), &self.grid);
        self.edit_label(id, "Move label", |l| {
            l.x = at.x;
            l.y = at.y;
        })
    }

    pub fn set_label_text(&mut self, id: &str, text: &str) -> bool {
        self.edit_label(id, "Edit label", |l| l.text = text.to_string())
    }

    pub fn delete_label(&mut self, id: &str) -> bool {
        let Some((index, entity)) = self.diagram.remove_entity(EntityKind::Label, id) else {
            debug!(%id, "no such label");
            return false;
        };
        self.record(commands::removed("Delete label", index, entity));
        true
    }
}
