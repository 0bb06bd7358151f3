//! Equipment records and their per-type lookup tables.

use chrono::{DateTime, Utc};
use pb_core::{Point, Real, Rect};
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPoint;
use crate::layer::DEFAULT_LAYER_ID;

/// Kind of facility equipment.
///
/// Every per-type table below is an exhaustive `match`, so adding a variant
/// only compiles once each table has an entry for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentType {
    Valve,
    Breaker,
    Pump,
    Chiller,
    Generator,
    #[serde(rename = "ATS")]
    Ats,
    #[serde(rename = "UPS")]
    Ups,
    Motor,
    Transformer,
    Switch,
    #[serde(rename = "PDU")]
    Pdu,
    #[serde(rename = "STS")]
    Sts,
    BusBar,
    Junction,
}

/// Substring keywords tried in order by [`EquipmentType::parse`].
///
/// Longer, more specific words come first; short abbreviations that occur
/// inside ordinary words ("gen" in "emergency") come last.
const PARSE_PRECEDENCE: &[(&str, EquipmentType)] = &[
    ("valve", EquipmentType::Valve),
    ("breaker", EquipmentType::Breaker),
    ("pump", EquipmentType::Pump),
    ("chiller", EquipmentType::Chiller),
    ("generator", EquipmentType::Generator),
    ("transformer", EquipmentType::Transformer),
    ("busbar", EquipmentType::BusBar),
    ("bus bar", EquipmentType::BusBar),
    ("junction", EquipmentType::Junction),
    ("switch", EquipmentType::Switch),
    ("motor", EquipmentType::Motor),
    ("pdu", EquipmentType::Pdu),
    ("sts", EquipmentType::Sts),
    ("ats", EquipmentType::Ats),
    ("ups", EquipmentType::Ups),
    ("xfmr", EquipmentType::Transformer),
    ("gen", EquipmentType::Generator),
];

impl EquipmentType {
    pub const ALL: [EquipmentType; 14] = [
        EquipmentType::Valve,
        EquipmentType::Breaker,
        EquipmentType::Pump,
        EquipmentType::Chiller,
        EquipmentType::Generator,
        EquipmentType::Ats,
        EquipmentType::Ups,
        EquipmentType::Motor,
        EquipmentType::Transformer,
        EquipmentType::Switch,
        EquipmentType::Pdu,
        EquipmentType::Sts,
        EquipmentType::BusBar,
        EquipmentType::Junction,
    ];

    /// Display name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            EquipmentType::Valve => "Valve",
            EquipmentType::Breaker => "Breaker",
            EquipmentType::Pump => "Pump",
            EquipmentType::Chiller => "Chiller",
            EquipmentType::Generator => "Generator",
            EquipmentType::Ats => "ATS",
            EquipmentType::Ups => "UPS",
            EquipmentType::Motor => "Motor",
            EquipmentType::Transformer => "Transformer",
            EquipmentType::Switch => "Switch",
            EquipmentType::Pdu => "PDU",
            EquipmentType::Sts => "STS",
            EquipmentType::BusBar => "BusBar",
            EquipmentType::Junction => "Junction",
        }
    }

    /// Valid positions, in presentation order.
    pub fn position_options(self) -> &'static [&'static str] {
        match self {
            EquipmentType::Valve => &["open", "closed"],
            EquipmentType::Breaker => &["closed", "open", "tripped"],
            EquipmentType::Pump => &["on", "off"],
            EquipmentType::Chiller => &["available", "unavailable"],
            EquipmentType::Generator => &["on", "off", "standby"],
            EquipmentType::Ats => &["normal", "emergency", "test"],
            EquipmentType::Ups => &["on", "off", "bypass"],
            EquipmentType::Motor => &["on", "off"],
            EquipmentType::Transformer => &["energized", "de-energized"],
            EquipmentType::Switch => &["open", "closed"],
            EquipmentType::Pdu => &["on", "off"],
            EquipmentType::Sts => &["source 1", "source 2", "bypass", "off"],
            EquipmentType::BusBar => &["energized", "isolated"],
            EquipmentType::Junction => &["connected"],
        }
    }

    pub fn default_normal_position(self) -> &'static str {
        match self {
            EquipmentType::Valve => "open",
            EquipmentType::Breaker => "closed",
            EquipmentType::Pump => "off",
            EquipmentType::Chiller => "available",
            EquipmentType::Generator => "off",
            EquipmentType::Ats => "normal",
            EquipmentType::Ups => "on",
            EquipmentType::Motor => "off",
            EquipmentType::Transformer => "energized",
            EquipmentType::Switch => "open",
            EquipmentType::Pdu => "on",
            EquipmentType::Sts => "source 1",
            EquipmentType::BusBar => "energized",
            EquipmentType::Junction => "connected",
        }
    }

    /// Placement size (width, height) for new equipment of this type.
    pub fn default_size(self) -> (Real, Real) {
        match self {
            EquipmentType::Valve => (50.0, 50.0),
            EquipmentType::Breaker => (70.0, 50.0),
            EquipmentType::Pump => (60.0, 60.0),
            EquipmentType::Chiller => (100.0, 70.0),
            EquipmentType::Generator => (80.0, 80.0),
            EquipmentType::Ats => (70.0, 60.0),
            EquipmentType::Ups => (70.0, 60.0),
            EquipmentType::Motor => (60.0, 60.0),
            EquipmentType::Transformer => (70.0, 70.0),
            EquipmentType::Switch => (50.0, 50.0),
            EquipmentType::Pdu => (60.0, 60.0),
            EquipmentType::Sts => (70.0, 60.0),
            EquipmentType::BusBar => (200.0, 30.0),
            EquipmentType::Junction => (30.0, 30.0),
        }
    }

    /// Whether this type takes part in electrical conduction gating.
    ///
    /// Non-relevant equipment wired into an electrical net is passive: it is
    /// energized when reached but never forwards power.
    pub fn is_electrically_relevant(self) -> bool {
        matches!(
            self,
            EquipmentType::Breaker
                | EquipmentType::Switch
                | EquipmentType::Ats
                | EquipmentType::Ups
                | EquipmentType::Pdu
                | EquipmentType::Sts
                | EquipmentType::Transformer
                | EquipmentType::Generator
                | EquipmentType::BusBar
                | EquipmentType::Junction
        )
    }

    /// Best-effort classification of free text.
    ///
    /// An exact (case-insensitive) type name wins; otherwise the first
    /// keyword of [`PARSE_PRECEDENCE`] found as a substring decides. Text
    /// with no recognizable keyword yields `None`.
    pub fn parse(text: &str) -> Option<EquipmentType> {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if let Some(exact) = Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(&lower))
        {
            return Some(exact);
        }
        PARSE_PRECEDENCE
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, ty)| *ty)
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Status derived from comparing current against normal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Normal,
    Abnormal,
    Warning,
    Unknown,
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EquipmentStatus::Normal => "Normal",
            EquipmentStatus::Abnormal => "Abnormal",
            EquipmentStatus::Warning => "Warning",
            EquipmentStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

const WARNING_POSITIONS: [&str; 3] = ["standby", "bypass", "test"];

const ACTIVE_POSITIONS: [&str; 7] = [
    "on",
    "closed",
    "energized",
    "available",
    "normal",
    "source 1",
    "source 2",
];

fn position_is(position: &str, expected: &str) -> bool {
    position.trim().eq_ignore_ascii_case(expected)
}

fn position_in(position: &str, set: &[&str]) -> bool {
    set.iter().any(|s| position_is(position, s))
}

/// A piece of equipment placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub normal_position: String,
    #[serde(default)]
    pub current_position: String,
    #[serde(default)]
    pub x: Real,
    #[serde(default)]
    pub y: Real,
    #[serde(default = "default_extent")]
    pub width: Real,
    #[serde(default = "default_extent")]
    pub height: Real,
    #[serde(default)]
    pub grid_anchor: AnchorPoint,
    #[serde(default)]
    pub connection_anchor: AnchorPoint,
    #[serde(default)]
    pub is_energized: bool,
    #[serde(skip)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_loto: bool,
    #[serde(default)]
    pub layer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

fn default_extent() -> Real {
    50.0
}

impl Equipment {
    /// New equipment at the origin with the type's default size and
    /// position, on the default layer.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        equipment_type: EquipmentType,
    ) -> Self {
        let (width, height) = equipment_type.default_size();
        let position = equipment_type.default_normal_position().to_string();
        Self {
            id: id.into(),
            name: name.into(),
            equipment_type,
            normal_position: position.clone(),
            current_position: position,
            x: 0.0,
            y: 0.0,
            width,
            height,
            grid_anchor: AnchorPoint::default(),
            connection_anchor: AnchorPoint::default(),
            is_energized: false,
            is_selected: false,
            is_loto: false,
            layer_id: DEFAULT_LAYER_ID.to_string(),
            last_updated: None,
            notes: String::new(),
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

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn position_options(&self) -> &'static [&'static str] {
        self.equipment_type.position_options()
    }

    /// Case-insensitive membership in this type's option set.
    pub fn is_valid_position(&self, position: &str) -> bool {
        position_in(position, self.position_options())
    }

    pub fn status(&self) -> EquipmentStatus {
        let normal = self.normal_position.trim();
        let current = self.current_position.trim();
        if normal.is_empty() || normal.eq_ignore_ascii_case("unknown") || current.is_empty() {
            return EquipmentStatus::Unknown;
        }
        if current.eq_ignore_ascii_case(normal) {
            return EquipmentStatus::Normal;
        }
        if position_in(current, &WARNING_POSITIONS) {
            return EquipmentStatus::Warning;
        }
        EquipmentStatus::Abnormal
    }

    /// Whether power entering this equipment passes through it.
    pub fn can_conduct_electricity(&self) -> bool {
        let p = self.current_position.as_str();
        match self.equipment_type {
            EquipmentType::Breaker | EquipmentType::Switch => position_is(p, "closed"),
            EquipmentType::Ats => position_in(p, &["normal", "emergency"]),
            EquipmentType::Ups => position_in(p, &["on", "bypass"]),
            EquipmentType::Pdu => position_is(p, "on"),
            EquipmentType::Sts => position_in(p, &["source 1", "source 2"]),
            EquipmentType::Transformer | EquipmentType::BusBar => position_is(p, "energized"),
            EquipmentType::Junction => true,
            EquipmentType::Valve
            | EquipmentType::Pump
            | EquipmentType::Chiller
            | EquipmentType::Generator
            | EquipmentType::Motor => false,
        }
    }

    /// Whether this equipment injects power into the network.
    pub fn is_power_source(&self) -> bool {
        let p = self.current_position.as_str();
        match self.equipment_type {
            EquipmentType::Generator => position_is(p, "on"),
            EquipmentType::Transformer => position_is(p, "energized"),
            _ => false,
        }
    }

    /// Equipment that should be running but has no supply.
    pub fn should_flash_no_power(&self) -> bool {
        !self.is_energized && position_in(&self.current_position, &ACTIVE_POSITIONS)
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new(String::new(), String::new(), EquipmentType::Valve)
    }
}
