//! Layers partition the diagram for visibility and locking.

use serde::{Deserialize, Serialize};

/// Id of the layer that always exists and cannot be deleted.
pub const DEFAULT_LAYER_ID: &str = "default";

pub const DEFAULT_LAYER_COLOR: &str = "#FF58A6FF";

fn default_color() -> String {
    DEFAULT_LAYER_COLOR.to_string()
}

fn visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    #[serde(default = "visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_visible: true,
            is_locked: false,
            order,
            color: default_color(),
        }
    }

    pub fn default_layer() -> Self {
        Self::new(DEFAULT_LAYER_ID, "Default", 0)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_LAYER_ID
    }
}
