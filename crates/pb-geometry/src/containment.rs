//! Group membership and group bounds.

use std::collections::BTreeSet;

use pb_core::{Real, Rect};
use pb_model::{Equipment, Group};
use serde::{Deserialize, Serialize};

/// Space kept between member equipment and the group border.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPadding {
    pub side: Real,
    pub top: Real,
    pub bottom: Real,
}

impl Default for GroupPadding {
    fn default() -> Self {
        Self {
            side: 10.0,
            top: 30.0,
            bottom: 10.0,
        }
    }
}

/// Equipment belongs to a group when its center lies inside the group
/// rectangle or the two rectangles overlap. Both tests include edges.
pub fn is_contained(equipment: &Equipment, group: &Group) -> bool {
    let group_rect = group.rect();
    let rect = equipment.rect();
    group_rect.contains(rect.center()) || group_rect.intersects(&rect)
}

pub fn membership(group: &Group, equipment: &[Equipment]) -> BTreeSet<String> {
    equipment
        .iter()
        .filter(|e| is_contained(e, group))
        .map(|e| e.id.clone())
        .collect()
}

/// Rewrite every group's member set from current geometry.
pub fn refresh_memberships(groups: &mut [Group], equipment: &[Equipment]) {
    for group in groups.iter_mut() {
        group.equipment_ids = membership(group, equipment);
    }
}

/// Rectangle enclosing `members` plus `padding`. `None` for no members.
pub fn group_bounds<I>(members: I, padding: GroupPadding) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    let inner = Rect::bounding(members)?;
    Some(Rect::new(
        inner.x - padding.side,
        inner.y - padding.top,
        inner.width + 2.0 * padding.side,
        inner.height + padding.top + padding.bottom,
    ))
}
