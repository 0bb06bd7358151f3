//! Free-text annotations.

use pb_core::{Point, Real};
use serde::{Deserialize, Serialize};

use crate::layer::DEFAULT_LAYER_ID;

fn default_font_size() -> Real {
    14.0
}

fn default_color() -> String {
    "#FFFFFFFF".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub x: Real,
    #[serde(default)]
    pub y: Real,
    #[serde(default = "default_font_size")]
    pub font_size: Real,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub layer_id: String,
    #[serde(skip)]
    pub is_selected: bool,
}

impl Label {
    pub fn new(id: impl Into<String>, text: impl Into<String>, at: Point) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            x: at.x,
            y: at.y,
            font_size: default_font_size(),
            color: default_color(),
            layer_id: DEFAULT_LAYER_ID.to_string(),
            is_selected: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
