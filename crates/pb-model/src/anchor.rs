//! Anchor points on an equipment bounding box.

use serde::{Deserialize, Serialize};

/// One of the 9 named positions on a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnchorPoint {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AnchorPoint {
    pub const ALL: [AnchorPoint; 9] = [
        AnchorPoint::TopLeft,
        AnchorPoint::TopCenter,
        AnchorPoint::TopRight,
        AnchorPoint::MiddleLeft,
        AnchorPoint::Center,
        AnchorPoint::MiddleRight,
        AnchorPoint::BottomLeft,
        AnchorPoint::BottomCenter,
        AnchorPoint::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnchorPoint::TopLeft => "TopLeft",
            AnchorPoint::TopCenter => "TopCenter",
            AnchorPoint::TopRight => "TopRight",
            AnchorPoint::MiddleLeft => "MiddleLeft",
            AnchorPoint::Center => "Center",
            AnchorPoint::MiddleRight => "MiddleRight",
            AnchorPoint::BottomLeft => "BottomLeft",
            AnchorPoint::BottomCenter => "BottomCenter",
            AnchorPoint::BottomRight => "BottomRight",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Fractions of (width, height) from the top-left corner.
    pub fn fractions(self) -> (f64, f64) {
        match self {
            AnchorPoint::TopLeft => (0.0, 0.0),
            AnchorPoint::TopCenter => (0.5, 0.0),
            AnchorPoint::TopRight => (1.0, 0.0),
            AnchorPoint::MiddleLeft => (0.0, 0.5),
            AnchorPoint::Center => (0.5, 0.5),
            AnchorPoint::MiddleRight => (1.0, 0.5),
            AnchorPoint::BottomLeft => (0.0, 1.0),
            AnchorPoint::BottomCenter => (0.5, 1.0),
            AnchorPoint::BottomRight => (1.0, 1.0),
        }
    }
}

/// Four-point anchor names kept by older diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyAnchor {
    Top,
    Bottom,
    Left,
    Right,
}

impl LegacyAnchor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "top" => Some(LegacyAnchor::Top),
            "bottom" => Some(LegacyAnchor::Bottom),
            "left" => Some(LegacyAnchor::Left),
            "right" => Some(LegacyAnchor::Right),
            _ => None,
        }
    }

    /// The edge midpoint this legacy name stands for.
    pub fn to_anchor(self) -> AnchorPoint {
        match self {
            LegacyAnchor::Top => AnchorPoint::TopCenter,
            LegacyAnchor::Bottom => AnchorPoint::BottomCenter,
            LegacyAnchor::Left => AnchorPoint::MiddleLeft,
            LegacyAnchor::Right => AnchorPoint::MiddleRight,
        }
    }
}
