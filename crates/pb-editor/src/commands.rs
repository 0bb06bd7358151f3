//! Undo command builders over [`Diagram`].
//!
//! Every builder captures value snapshots; none of them holds references
//! into the diagram. Derived fields (endpoints, membership, energization)
//! in the snapshots are irrelevant because the controller recomputes them
//! after each undo and redo.

use pb_history::Command;

use crate::diagram::{Diagram, Entity, GeometrySnapshot};

pub type DiagramCommand = Command<Diagram>;

/// Undo removes `entity`; redo puts it back at `index`.
pub fn inserted(description: impl Into<String>, index: usize, entity: Entity) -> DiagramCommand {
    let kind = entity.kind();
    let id = entity.id().to_string();
    Command::atomic(
        description,
        move |d: &mut Diagram| {
            d.remove_entity(kind, &id);
        },
        move |d: &mut Diagram| d.insert_entity(index, entity.clone()),
    )
}

/// Undo puts `entity` back at `index`; redo removes it again.
pub fn removed(description: impl Into<String>, index: usize, entity: Entity) -> DiagramCommand {
    let kind = entity.kind();
    let id = entity.id().to_string();
    Command::atomic(
        description,
        move |d: &mut Diagram| d.insert_entity(index, entity.clone()),
        move |d: &mut Diagram| {
            d.remove_entity(kind, &id);
        },
    )
}

/// Swap one entity value for another with the same id.
pub fn replaced(description: impl Into<String>, before: Entity, after: Entity) -> DiagramCommand {
    Command::atomic(
        description,
        move |d: &mut Diagram| {
            d.replace_entity(before.clone());
        },
        move |d: &mut Diagram| {
            d.replace_entity(after.clone());
        },
    )
}

pub fn geometry_changed(
    description: impl Into<String>,
    before: GeometrySnapshot,
    after: GeometrySnapshot,
) -> DiagramCommand {
    Command::atomic(
        description,
        move |d: &mut Diagram| before.apply(d),
        move |d: &mut Diagram| after.apply(d),
    )
}
