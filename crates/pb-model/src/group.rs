//! Rectangular groups of equipment.

use std::collections::BTreeSet;

use pb_core::{Real, Rect};
use serde::{Deserialize, Serialize};

use crate::layer::DEFAULT_LAYER_ID;

fn group_type() -> String {
    "Group".to_string()
}

/// A named rectangle on the canvas.
///
/// `equipment_ids` is derived from geometry: it always holds exactly the
/// equipment contained by the rectangle and is rewritten after every move,
/// resize or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default = "group_type")]
    pub group_type: String,
    #[serde(default)]
    pub x: Real,
    #[serde(default)]
    pub y: Real,
    #[serde(default)]
    pub width: Real,
    #[serde(default)]
    pub height: Real,
    #[serde(default)]
    pub equipment_ids: BTreeSet<String>,
    #[serde(skip)]
    pub is_selected: bool,
    #[serde(default)]
    pub layer_id: String,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group_type: group_type(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            equipment_ids: BTreeSet::new(),
            is_selected: false,
            layer_id: DEFAULT_LAYER_ID.to_string(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn contains_member(&self, equipment_id: &str) -> bool {
        self.equipment_ids.contains(equipment_id)
    }
}
