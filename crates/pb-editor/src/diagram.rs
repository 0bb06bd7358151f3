//! The live diagram owned by the controller.

use std::collections::BTreeSet;

use chrono::Utc;
use pb_core::{Real, Rect};
use pb_model::{Connection, Equipment, Group, HistoryEntry, Label, Layer};
use pb_power::PropagationSummary;
use pb_project::Snapshot;

/// All entity collections of one diagram plus the position change log.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub project_name: String,
    pub equipment: Vec<Equipment>,
    pub connections: Vec<Connection>,
    pub groups: Vec<Group>,
    pub labels: Vec<Label>,
    pub layers: Vec<Layer>,
    /// Newest first.
    pub history_log: Vec<HistoryEntry>,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::from_snapshot(Snapshot::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Equipment,
    Connection,
    Group,
    Label,
    Layer,
}

/// A value snapshot of any diagram entity, used by undo commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Equipment(Equipment),
    Connection(Connection),
    Group(Group),
    Label(Label),
    Layer(Layer),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Equipment(_) => EntityKind::Equipment,
            Entity::Connection(_) => EntityKind::Connection,
            Entity::Group(_) => EntityKind::Group,
            Entity::Label(_) => EntityKind::Label,
            Entity::Layer(_) => EntityKind::Layer,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Equipment(e) => e.id.as_str(),
            Entity::Connection(c) => c.id.as_str(),
            Entity::Group(g) => g.id.as_str(),
            Entity::Label(l) => l.id.as_str(),
            Entity::Layer(l) => l.id.as_str(),
        }
    }
}

fn insert_at<T>(items: &mut Vec<T>, index: usize, item: T) {
    let index = index.min(items.len());
    items.insert(index, item);
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> Option<(usize, T)> {
    let index = items.iter().position(|item| id_of(item) == id)?;
    Some((index, items.remove(index)))
}

fn replace_by_id<T>(items: &mut [T], value: T, id_of: impl Fn(&T) -> &str) -> bool {
    let id = id_of(&value).to_string();
    match items.iter_mut().find(|item| id_of(item) == id.as_str()) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

impl Diagram {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            project_name: snapshot.project_name,
            equipment: snapshot.equipment,
            connections: snapshot.connections,
            groups: snapshot.groups,
            labels: snapshot.labels,
            layers: snapshot.layers,
            history_log: snapshot.history,
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            project_name: self.project_name.clone(),
            equipment: self.equipment.clone(),
            history: self.history_log.clone(),
            connections: self.connections.clone(),
            groups: self.groups.clone(),
            labels: self.labels.clone(),
            layers: self.layers.clone(),
            last_saved: Some(Utc::now()),
        }
    }

    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn equipment_mut(&mut self, id: &str) -> Option<&mut Equipment> {
        self.equipment.iter_mut().find(|e| e.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Unknown layers count as unlocked.
    pub fn is_layer_locked(&self, layer_id: &str) -> bool {
        self.layer(layer_id).is_some_and(|l| l.is_locked)
    }

    /// Unknown layers count as visible.
    pub fn is_layer_visible(&self, layer_id: &str) -> bool {
        self.layer(layer_id).is_none_or(|l| l.is_visible)
    }

    pub fn entity(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        match kind {
            EntityKind::Equipment => self.equipment(id).cloned().map(Entity::Equipment),
            EntityKind::Connection => self.connection(id).cloned().map(Entity::Connection),
            EntityKind::Group => self.group(id).cloned().map(Entity::Group),
            EntityKind::Label => self.label(id).cloned().map(Entity::Label),
            EntityKind::Layer => self.layer(id).cloned().map(Entity::Layer),
        }
    }

    /// Insert at `index`, clamped to the collection length.
    pub fn insert_entity(&mut self, index: usize, entity: Entity) {
        match entity {
            Entity::Equipment(e) => insert_at(&mut self.equipment, index, e),
            Entity::Connection(c) => insert_at(&mut self.connections, index, c),
            Entity::Group(g) => insert_at(&mut self.groups, index, g),
            Entity::Label(l) => insert_at(&mut self.labels, index, l),
            Entity::Layer(l) => insert_at(&mut self.layers, index, l),
        }
    }

    /// Remove by id, returning the former index and value.
    pub fn remove_entity(&mut self, kind: EntityKind, id: &str) -> Option<(usize, Entity)> {
        match kind {
            EntityKind::Equipment => {
                remove_by_id(&mut self.equipment, id, |e| e.id.as_str()).map(|(i, e)| (i, Entity::Equipment(e)))
            }
            EntityKind::Connection => remove_by_id(&mut self.connections, id, |c| c.id.as_str())
                .map(|(i, c)| (i, Entity::Connection(c))),
            EntityKind::Group => {
                remove_by_id(&mut self.groups, id, |g| g.id.as_str()).map(|(i, g)| (i, Entity::Group(g)))
            }
            EntityKind::Label => {
                remove_by_id(&mut self.labels, id, |l| l.id.as_str()).map(|(i, l)| (i, Entity::Label(l)))
            }
            EntityKind::Layer => {
                remove_by_id(&mut self.layers, id, |l| l.id.as_str()).map(|(i, l)| (i, Entity::Layer(l)))
            }
        }
    }

    /// Overwrite the entity with the same kind and id. Returns false when
    /// no such entity exists.
    pub fn replace_entity(&mut self, entity: Entity) -> bool {
        match entity {
            Entity::Equipment(e) => replace_by_id(&mut self.equipment, e, |e| e.id.as_str()),
            Entity::Connection(c) => replace_by_id(&mut self.connections, c, |c| c.id.as_str()),
            Entity::Group(g) => replace_by_id(&mut self.groups, g, |g| g.id.as_str()),
            Entity::Label(l) => replace_by_id(&mut self.labels, l, |l| l.id.as_str()),
            Entity::Layer(l) => replace_by_id(&mut self.layers, l, |l| l.id.as_str()),
        }
    }

    /// Recompute every derived field: connection endpoints, group
    /// membership and energization.
    pub fn refresh(&mut self) -> PropagationSummary {
        self.refresh_connection_endpoints();
        pb_geometry::refresh_memberships(&mut self.groups, &self.equipment);
        pb_power::recalculate(&mut self.equipment, &mut self.connections)
    }

    pub fn refresh_connection_endpoints(&mut self) {
        let equipment = &self.equipment;
        for connection in &mut self.connections {
            let source = equipment.iter().find(|e| e.id == connection.source_equipment_id);
            let target = equipment.iter().find(|e| e.id == connection.target_equipment_id);
            if let (Some(source), Some(target)) = (source, target) {
                pb_geometry::update_connection_endpoints(connection, source, target);
            }
        }
    }

    pub fn geometry(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            equipment: self
                .equipment
                .iter()
                .map(|e| (e.id.clone(), e.rect()))
                .collect(),
            groups: self
                .groups
                .iter()
                .map(|g| (g.id.clone(), g.rect(), g.equipment_ids.clone()))
                .collect(),
        }
    }
}

/// Rectangles of every equipment and group, plus group members.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometrySnapshot {
    pub equipment: Vec<(String, Rect)>,
    pub groups: Vec<(String, Rect, BTreeSet<String>)>,
}

fn rect_moved(a: Rect, b: Rect, epsilon: Real) -> bool {
    pb_core::moved_beyond((a.x, a.y), (b.x, b.y), epsilon)
        || pb_core::moved_beyond((a.width, a.height), (b.width, b.height), epsilon)
}

impl GeometrySnapshot {
    /// Write the stored rectangles back. Entities that no longer exist are
    /// skipped.
    pub fn apply(&self, diagram: &mut Diagram) {
        for (id, rect) in &self.equipment {
            if let Some(e) = diagram.equipment_mut(id) {
                e.set_rect(*rect);
            }
        }
        for (id, rect, members) in &self.groups {
            if let Some(g) = diagram.groups.iter_mut().find(|g| &g.id == id) {
                g.set_rect(*rect);
                g.equipment_ids = members.clone();
            }
        }
    }

    /// Whether any rectangle differs from `other` by more than `epsilon`.
    pub fn differs_from(&self, other: &GeometrySnapshot, epsilon: Real) -> bool {
        let equipment_moved = self.equipment.iter().any(|(id, rect)| {
            other
                .equipment
                .iter()
                .find(|(other_id, _)| other_id == id)
                .is_some_and(|(_, other_rect)| rect_moved(*rect, *other_rect, epsilon))
        });
        let groups_moved = self.groups.iter().any(|(id, rect, _)| {
            other
                .groups
                .iter()
                .find(|(other_id, _, _)| other_id == id)
                .is_some_and(|(_, other_rect, _)| rect_moved(*rect, *other_rect, epsilon))
        });
        equipment_moved || groups_moved
    }
}
