//! pb-power: electrical energization for plantboard diagrams.
//!
//! Provides:
//! - A compact adjacency index over electrical connections
//! - Reachability from power sources through conducting equipment
//!
//! This is pure reachability: no voltages, phases or load flow. Pipe
//! connections never take part.
//!
//! # Example
//!
//! ```
//! use pb_model::{Connection, ConnectionType, Equipment, EquipmentType};
//!
//! let mut generator = Equipment::new("g", "GEN-1", EquipmentType::Generator);
//! generator.current_position = "on".into();
//! let breaker = Equipment::new("b", "BKR-1", EquipmentType::Breaker);
//!
//! let mut equipment = vec![generator, breaker];
//! let mut connections = vec![Connection::new("c", "g", "b", ConnectionType::Electrical)];
//!
//! let summary = pb_power::recalculate(&mut equipment, &mut connections);
//! assert_eq!(summary.energized_equipment, 2);
//! assert!(connections[0].is_energized);
//! ```

pub mod network;
pub mod propagate;

pub use network::{Edge, ElectricalNetwork};
pub use propagate::{Energization, PropagationSummary, compute, recalculate};
