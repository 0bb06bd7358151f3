//! Selection state, drag snapshots and the clipboard.

use std::collections::{BTreeMap, HashMap};

use pb_core::{Point, Real, Rect, new_id};
use pb_model::{Connection, Equipment, Group, Label};

/// What is currently selected.
///
/// Equipment selection is an ordered set and may hold many ids. At most one
/// connection, group or label is selected at a time, and selecting any of
/// those clears everything else. Selecting equipment clears the single
/// selections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    equipment: Vec<String>,
    connection: Option<String>,
    group: Option<String>,
    label: Option<String>,
    drag_origins: BTreeMap<String, Rect>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipment_ids(&self) -> &[String] {
        &self.equipment
    }

    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Most recently added equipment, shown in detail panels.
    pub fn primary(&self) -> Option<&str> {
        self.equipment.last().map(String::as_str)
    }

    pub fn contains(&self, equipment_id: &str) -> bool {
        self.equipment.iter().any(|id| id == equipment_id)
    }

    pub fn has_equipment(&self) -> bool {
        !self.equipment.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
            && self.connection.is_none()
            && self.group.is_none()
            && self.label.is_none()
    }

    fn clear_singles(&mut self) {
        self.connection = None;
        self.group = None;
        self.label = None;
    }

    pub fn add(&mut self, equipment_id: &str) {
        self.clear_singles();
        if !self.contains(equipment_id) {
            self.equipment.push(equipment_id.to_string());
        }
    }

    pub fn toggle(&mut self, equipment_id: &str) {
        self.clear_singles();
        if let Some(pos) = self.equipment.iter().position(|id| id == equipment_id) {
            self.equipment.remove(pos);
        } else {
            self.equipment.push(equipment_id.to_string());
        }
    }

    pub fn set_single(&mut self, equipment_id: &str) {
        self.clear();
        self.equipment.push(equipment_id.to_string());
    }

    pub fn select_all<'a, I>(&mut self, equipment_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.clear();
        for id in equipment_ids {
            self.add(id);
        }
    }

    /// Add every equipment whose center lies inside `rect` (edges included).
    /// Existing selection is kept.
    pub fn select_in_rect(&mut self, rect: Rect, equipment: &[Equipment]) {
        for e in equipment {
            if rect.contains(e.center()) {
                self.add(&e.id);
            }
        }
    }

    pub fn select_connection(&mut self, connection_id: &str) {
        self.clear();
        self.connection = Some(connection_id.to_string());
    }

    pub fn select_group(&mut self, group_id: &str) {
        self.clear();
        self.group = Some(group_id.to_string());
    }

    pub fn select_label(&mut self, label_id: &str) {
        self.clear();
        self.label = Some(label_id.to_string());
    }

    pub fn clear(&mut self) {
        self.equipment.clear();
        self.clear_singles();
    }

    pub fn clear_equipment(&mut self) {
        self.equipment.clear();
    }

    pub fn clear_connection(&mut self) {
        self.connection = None;
    }

    pub fn clear_group(&mut self) {
        self.group = None;
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    /// Forget every selected id that no longer names a live entity.
    pub fn retain_existing(
        &mut self,
        equipment: &[Equipment],
        connections: &[Connection],
        groups: &[Group],
        labels: &[Label],
    ) {
        self.equipment
            .retain(|id| equipment.iter().any(|e| &e.id == id));
        if let Some(id) = &self.connection {
            if !connections.iter().any(|c| &c.id == id) {
                self.connection = None;
            }
        }
        if let Some(id) = &self.group {
            if !groups.iter().any(|g| &g.id == id) {
                self.group = None;
            }
        }
        if let Some(id) = &self.label {
            if !labels.iter().any(|l| &l.id == id) {
                self.label = None;
            }
        }
    }

    /// Write `is_selected` on every entity to match this selection.
    pub fn sync_flags(
        &self,
        equipment: &mut [Equipment],
        connections: &mut [Connection],
        groups: &mut [Group],
        labels: &mut [Label],
    ) {
        for e in equipment {
            e.is_selected = self.contains(&e.id);
        }
        for c in connections {
            c.is_selected = self.connection.as_deref() == Some(c.id.as_str());
        }
        for g in groups {
            g.is_selected = self.group.as_deref() == Some(g.id.as_str());
        }
        for l in labels {
            l.is_selected = self.label.as_deref() == Some(l.id.as_str());
        }
    }

    /// Remember where `items` are before a drag. Replaces earlier snapshots.
    pub fn begin_move<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Equipment>,
    {
        self.drag_origins = items
            .into_iter()
            .map(|e| (e.id.clone(), e.rect()))
            .collect();
    }

    pub fn is_moving(&self) -> bool {
        !self.drag_origins.is_empty()
    }

    /// Ids captured by [`begin_move`](Self::begin_move).
    pub fn moving_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.drag_origins.keys().map(String::as_str)
    }

    pub fn original_position(&self, equipment_id: &str) -> Option<Point> {
        self.drag_origins.get(equipment_id).map(Rect::origin)
    }

    pub fn original_rect(&self, equipment_id: &str) -> Option<Rect> {
        self.drag_origins.get(equipment_id).copied()
    }

    /// Drop the drag snapshots and hand them back.
    pub fn end_move(&mut self) -> BTreeMap<String, Rect> {
        std::mem::take(&mut self.drag_origins)
    }
}

/// Where pasted items land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PastePlacement {
    /// Shift every item by a fixed offset.
    Offset(Real, Real),
    /// Center the copied items' bounding box on a point.
    AtCursor(Point),
}

/// Fresh entities produced by one paste.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasteBatch {
    pub equipment: Vec<Equipment>,
    pub connections: Vec<Connection>,
}

/// Value snapshots of copied equipment and the connections among them.
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    equipment: Vec<Equipment>,
    connections: Vec<Connection>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Copy `selected`, plus every connection with both ends among them.
    /// Copying an empty selection leaves the clipboard unchanged.
    pub fn copy<'a, I>(&mut self, selected: I, connections: &[Connection]) -> usize
    where
        I: IntoIterator<Item = &'a Equipment>,
    {
        let equipment: Vec<Equipment> = selected.into_iter().cloned().collect();
        if equipment.is_empty() {
            return 0;
        }
        let copied = |id: &str| equipment.iter().any(|e| e.id == id);
        self.connections = connections
            .iter()
            .filter(|c| copied(&c.source_equipment_id) && copied(&c.target_equipment_id))
            .cloned()
            .collect();
        self.equipment = equipment;
        self.equipment.len()
    }

    fn bounding_center(&self) -> Option<Point> {
        Rect::bounding(self.equipment.iter().map(Equipment::rect)).map(|r| r.center())
    }

    /// Build fresh copies. `None` when the clipboard is empty.
    ///
    /// Copies get new ids and a `-copy` name suffix. Connections are
    /// rewired to the new ids. Runtime state is reset: not energized, not
    /// locked out, never updated.
    pub fn paste(&self, placement: PastePlacement) -> Option<PasteBatch> {
        let center = self.bounding_center()?;
        let (dx, dy) = match placement {
            PastePlacement::Offset(dx, dy) => (dx, dy),
            PastePlacement::AtCursor(cursor) => (cursor.x - center.x, cursor.y - center.y),
        };

        let mut id_map: HashMap<&str, String> = HashMap::new();
        let mut batch = PasteBatch::default();
        for original in &self.equipment {
            let mut copy = original.clone();
            copy.id = new_id();
            copy.name = format!("{}-copy", original.name);
            copy.x = original.x + dx;
            copy.y = original.y + dy;
            copy.is_energized = false;
            copy.is_selected = false;
            copy.is_loto = false;
            copy.last_updated = None;
            id_map.insert(original.id.as_str(), copy.id.clone());
            batch.equipment.push(copy);
        }

        for original in &self.connections {
            let source = id_map.get(original.source_equipment_id.as_str());
            let target = id_map.get(original.target_equipment_id.as_str());
            if let (Some(source), Some(target)) = (source, target) {
                let mut copy = original.clone();
                copy.id = new_id();
                copy.source_equipment_id = source.clone();
                copy.target_equipment_id = target.clone();
                copy.is_energized = false;
                copy.is_selected = false;
                batch.connections.push(copy);
            }
        }

        Some(batch)
    }
}
