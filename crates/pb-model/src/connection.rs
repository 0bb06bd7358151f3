//! Connections between two pieces of equipment.

use pb_core::{Point, Real};
use serde::{Deserialize, Serialize};

use crate::layer::DEFAULT_LAYER_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionType {
    #[default]
    Pipe,
    Electrical,
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::Pipe => f.write_str("Pipe"),
            ConnectionType::Electrical => f.write_str("Electrical"),
        }
    }
}

/// How the connection path is drawn between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoutingMode {
    #[default]
    Straight,
    Orthogonal,
}

fn center_anchor() -> String {
    "Center".to_string()
}

/// Directed link from a source to a target equipment.
///
/// Anchors are kept as names rather than [`crate::AnchorPoint`] so the
/// four legacy edge names stored by older diagrams survive a round trip.
/// The endpoint coordinates are derived from the two equipment rects and
/// are recomputed after every geometry change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source_equipment_id: String,
    pub target_equipment_id: String,
    #[serde(rename = "type", default)]
    pub connection_type: ConnectionType,
    #[serde(default = "center_anchor")]
    pub source_anchor: String,
    #[serde(default = "center_anchor")]
    pub target_anchor: String,
    #[serde(default)]
    pub x1: Real,
    #[serde(default)]
    pub y1: Real,
    #[serde(default)]
    pub x2: Real,
    #[serde(default)]
    pub y2: Real,
    #[serde(default)]
    pub is_energized: bool,
    #[serde(skip)]
    pub is_selected: bool,
    #[serde(default)]
    pub layer_id: String,
    #[serde(default)]
    pub routing: RoutingMode,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source_equipment_id: impl Into<String>,
        target_equipment_id: impl Into<String>,
        connection_type: ConnectionType,
    ) -> Self {
        Self {
            id: id.into(),
            source_equipment_id: source_equipment_id.into(),
            target_equipment_id: target_equipment_id.into(),
            connection_type,
            source_anchor: center_anchor(),
            target_anchor: center_anchor(),
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            is_energized: false,
            is_selected: false,
            layer_id: DEFAULT_LAYER_ID.to_string(),
            routing: RoutingMode::Straight,
        }
    }

    pub fn is_electrical(&self) -> bool {
        self.connection_type == ConnectionType::Electrical
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        self.x1 = start.x;
        self.y1 = start.y;
        self.x2 = end.x;
        self.y2 = end.y;
    }

    /// Whether either endpoint refers to `equipment_id`.
    pub fn touches(&self, equipment_id: &str) -> bool {
        self.source_equipment_id == equipment_id || self.target_equipment_id == equipment_id
    }

    /// The endpoint opposite `equipment_id`, if this connection touches it.
    pub fn other_end(&self, equipment_id: &str) -> Option<&str> {
        if self.source_equipment_id == equipment_id {
            Some(&self.target_equipment_id)
        } else if self.target_equipment_id == equipment_id {
            Some(&self.source_equipment_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{"id":"c1","source_equipment_id":"a","target_equipment_id":"b"}"#;
        let c: Connection = serde_json::from_str(json).unwrap();
        assert_eq!(c.connection_type, ConnectionType::Pipe);
        assert_eq!(c.source_anchor, "Center");
        assert_eq!(c.target_anchor, "Center");
        assert_eq!(c.routing, RoutingMode::Straight);
        assert_eq!(c.layer_id, "");
    }

    #[test]
    fn other_end_is_symmetric() {
        let c = Connection::new("c", "a", "b", ConnectionType::Electrical);
        assert_eq!(c.other_end("a"), Some("b"));
        assert_eq!(c.other_end("b"), Some("a"));
        assert_eq!(c.other_end("z"), None);
        assert!(c.touches("a") && !c.touches("z"));
    }
}
