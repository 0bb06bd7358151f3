//! pb-model: entity model for plantboard diagrams.
//!
//! Provides:
//! - Equipment with its type tables and derived status / conduction predicates
//! - Connections, groups, layers and free-text labels
//! - The 9-point anchor enumeration shared by snapping and connection endpoints
//! - Position change log entries
//!
//! Everything here is plain data. Derived properties are functions of the
//! stored fields and are recomputed on every call.

pub mod anchor;
pub mod connection;
pub mod equipment;
pub mod group;
pub mod history;
pub mod label;
pub mod layer;

pub use anchor::{AnchorPoint, LegacyAnchor};
pub use connection::{Connection, ConnectionType, RoutingMode};
pub use equipment::{Equipment, EquipmentStatus, EquipmentType};
pub use group::Group;
pub use history::HistoryEntry;
pub use label::Label;
pub use layer::{DEFAULT_LAYER_ID, Layer};
