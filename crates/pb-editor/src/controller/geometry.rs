//! Moving and resizing equipment and groups.

use std::collections::BTreeSet;

use pb_core::{Point, Real, Rect};
use pb_geometry::{anchor_offset, snap_anchor_to_grid, snap_to_grid};
use tracing::debug;

use super::{DiagramController, DragSession};
use crate::commands;
use crate::diagram::GeometrySnapshot;

impl DiagramController {
    /// Open a drag session over `ids`, or over the selected equipment when
    /// `ids` is empty. Until [`end_move`](Self::end_move) nothing is
    /// recorded or saved.
    pub fn begin_move(&mut self, ids: &[&str]) {
        let ids: Vec<String> = if ids.is_empty() {
            self.selection.equipment_ids().to_vec()
        } else {
            ids.iter().map(|id| id.to_string()).collect()
        };
        self.selection.begin_move(
            self.diagram
                .equipment
                .iter()
                .filter(|e| ids.contains(&e.id)),
        );
        self.drag = Some(DragSession {
            before: self.diagram.geometry(),
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Close the drag session. Records one command when anything moved
    /// further than the configured epsilon.
    pub fn end_move(&mut self) -> bool {
        self.selection.end_move();
        let Some(session) = self.drag.take() else {
            return false;
        };
        let after = self.diagram.geometry();
        if !after.differs_from(&session.before, self.config.move_epsilon) {
            debug!("drag ended without movement");
            session.before.apply(&mut self.diagram);
            self.refresh_derived();
            return false;
        }
        self.record(commands::geometry_changed("Move", session.before, after));
        true
    }

    /// Close the drag session and put everything back where it stood when
    /// the drag began. Nothing is recorded.
    pub fn cancel_move(&mut self) -> bool {
        self.selection.end_move();
        let Some(session) = self.drag.take() else {
            return false;
        };
        session.before.apply(&mut self.diagram);
        self.refresh_derived();
        debug!("drag cancelled");
        true
    }

    /// Geometry to compare against when this change must be recorded on its
    /// own, `None` inside a drag session.
    fn geometry_baseline(&self) -> Option<GeometrySnapshot> {
        match self.drag {
            Some(_) => None,
            None => Some(self.diagram.geometry()),
        }
    }

    /// Records the change, or reverts it when it stays within the epsilon.
    fn finish_geometry_change(&mut self, description: &str, baseline: Option<GeometrySnapshot>) {
        let Some(before) = baseline else {
            self.refresh_derived();
            return;
        };
        let after = self.diagram.geometry();
        if after.differs_from(&before, self.config.move_epsilon) {
            self.record(commands::geometry_changed(description, before, after));
        } else {
            debug!(%description, "change within epsilon, reverted");
            before.apply(&mut self.diagram);
            self.refresh_derived();
        }
    }

    fn locked_layers(&self) -> BTreeSet<String> {
        self.diagram
            .layers
            .iter()
            .filter(|l| l.is_locked)
            .map(|l| l.id.clone())
            .collect()
    }

    /// Snap and apply a new rectangle. False for unknown or locked items.
    fn place_equipment(&mut self, id: &str, rect: Rect) -> bool {
        let grid = self.grid;
        let Some(equipment) = self.diagram.equipment(id) else {
            debug!(%id, "no such equipment");
            return false;
        };
        if self.diagram.is_layer_locked(&equipment.layer_id) {
            debug!(%id, layer = %equipment.layer_id, "equipment is on a locked layer");
            return false;
        }
        let offset = anchor_offset(rect, equipment.grid_anchor);
        let top_left = snap_anchor_to_grid(rect.origin(), offset, &grid);
        if let Some(equipment) = self.diagram.equipment_mut(id) {
            equipment.set_rect(Rect::new(top_left.x, top_left.y, rect.width, rect.height));
        }
        true
    }

    /// Move one item so its top-left lands near `(x, y)`.
    pub fn move_equipment(&mut self, id: &str, x: Real, y: Real) -> bool {
        let Some(size) = self.diagram.equipment(id).map(|e| (e.width, e.height)) else {
            debug!(%id, "no such equipment");
            return false;
        };
        let baseline = self.geometry_baseline();
        if !self.place_equipment(id, Rect::new(x, y, size.0, size.1)) {
            return false;
        }
        self.finish_geometry_change("Move equipment", baseline);
        true
    }

    /// Shift the dragged items by `(dx, dy)` from where they stood when the
    /// drag began. Outside a drag the selected items move from where they
    /// are. Returns how many items moved.
    pub fn drag_selection(&mut self, dx: Real, dy: Real) -> usize {
        let baseline = self.geometry_baseline();
        let ids: Vec<String> = if self.selection.is_moving() {
            self.selection.moving_ids().map(str::to_string).collect()
        } else {
            self.selection.equipment_ids().to_vec()
        };
        let mut moved = 0;
        for id in &ids {
            let origin = self
                .selection
                .original_rect(id)
                .or_else(|| self.diagram.equipment(id).map(|e| e.rect()));
            let Some(origin) = origin else {
                continue;
            };
            let target = origin.translated(dx, dy);
            let current = self.diagram.equipment(id).map(|e| e.rect());
            let rect = Rect::new(
                target.x,
                target.y,
                current.map_or(origin.width, |r| r.width),
                current.map_or(origin.height, |r| r.height),
            );
            if self.place_equipment(id, rect) {
                moved += 1;
            }
        }
        if moved > 0 {
            self.finish_geometry_change("Move selection", baseline);
        }
        moved
    }

    /// New bounds with both sides floored at the minimum size. The size is
    /// kept as given; the position is anchor-snapped.
    pub fn resize_equipment(&mut self, id: &str, rect: Rect) -> bool {
        let min = self.config.min_equipment_size;
        let rect = Rect::new(rect.x, rect.y, rect.width.max(min), rect.height.max(min));
        let baseline = self.geometry_baseline();
        if !self.place_equipment(id, rect) {
            return false;
        }
        self.finish_geometry_change("Resize equipment", baseline);
        true
    }

    /// Shift member equipment, skipping members on locked layers.
    fn shift_members(&mut self, members: &BTreeSet<String>, dx: Real, dy: Real) {
        let locked = self.locked_layers();
        for e in self
            .diagram
            .equipment
            .iter_mut()
            .filter(|e| members.contains(&e.id) && !locked.contains(&e.layer_id))
        {
            e.x += dx;
            e.y += dy;
        }
    }

    /// Move a group's snapped origin by `(dx, dy)`; members follow by the
    /// distance the origin actually moved.
    pub fn move_group(&mut self, id: &str, dx: Real, dy: Real) -> bool {
        let Some(group) = self.diagram.group(id) else {
            debug!(%id, "no such group");
            return false;
        };
        if self.diagram.is_layer_locked(&group.layer_id) {
            debug!(%id, "group is on a locked layer");
            return false;
        }
        let origin = group.rect().origin();
        let members = group.equipment_ids.clone();
        let target = snap_to_grid(Point::new(origin.x + dx, origin.y + dy), &self.grid);

        let baseline = self.geometry_baseline();
        self.shift_members(&members, target.x - origin.x, target.y - origin.y);
        if let Some(group) = self.diagram.groups.iter_mut().find(|g| g.id == id) {
            group.x = target.x;
            group.y = target.y;
        }
        self.finish_geometry_change("Move group", baseline);
        true
    }

    /// Resize a group. Members shift with the group's snapped origin.
    pub fn resize_group(&mut self, id: &str, rect: Rect) -> bool {
        let Some(group) = self.diagram.group(id) else {
            debug!(%id, "no such group");
            return false;
        };
        if self.diagram.is_layer_locked(&group.layer_id) {
            debug!(%id, "group is on a locked layer");
            return false;
        }
        let origin = group.rect().origin();
        let members = group.equipment_ids.clone();
        let min = self.config.min_equipment_size;
        let target = snap_to_grid(rect.origin(), &self.grid);

        let baseline = self.geometry_baseline();
        self.shift_members(&members, target.x - origin.x, target.y - origin.y);
        if let Some(group) = self.diagram.groups.iter_mut().find(|g| g.id == id) {
            group.set_rect(Rect::new(
                target.x,
                target.y,
                rect.width.max(min),
                rect.height.max(min),
            ));
        }
        self.finish_geometry_change("Resize group", baseline);
        true
    }
}
