//! Demo project: a small data-center mechanical room.

use pb_model::{Equipment, EquipmentType};

use crate::schema::Snapshot;

/// Equipment flipped away from its normal position in the demo.
const ABNORMAL_IDS: [&str; 3] = ["chw-v-003", "chw-p-002", "msb-003"];

fn opposite_position(position: &str) -> &str {
    match position.to_ascii_lowercase().as_str() {
        "open" => "closed",
        "closed" => "open",
        "on" => "off",
        "off" => "on",
        "normal" => "emergency",
        "emergency" => "normal",
        "energized" => "de-energized",
        "de-energized" => "energized",
        "available" => "unavailable",
        "unavailable" => "available",
        _ => position,
    }
}

pub fn demo_snapshot() -> Snapshot {
    use EquipmentType::*;

    let items: [(&str, &str, EquipmentType, &str, f64, f64, f64, f64); 12] = [
        ("chw-v-001", "CHW-V-001", Valve, "open", 100.0, 200.0, 50.0, 50.0),
        ("chw-v-002", "CHW-V-002", Valve, "open", 300.0, 200.0, 50.0, 50.0),
        ("chw-v-003", "CHW-V-003", Valve, "closed", 500.0, 200.0, 50.0, 50.0),
        ("chw-p-001", "CHW-P-001", Pump, "on", 200.0, 320.0, 60.0, 60.0),
        ("chw-p-002", "CHW-P-002", Pump, "off", 400.0, 320.0, 60.0, 60.0),
        ("ch-001", "CHILLER-001", Chiller, "available", 280.0, 80.0, 100.0, 70.0),
        ("msb-001", "MSB-001", Breaker, "closed", 620.0, 80.0, 70.0, 50.0),
        ("msb-002", "MSB-002", Breaker, "closed", 620.0, 160.0, 70.0, 50.0),
        ("msb-003", "MSB-003", Breaker, "open", 620.0, 240.0, 70.0, 50.0),
        ("gen-001", "GEN-001", Generator, "off", 750.0, 130.0, 80.0, 80.0),
        ("ats-001", "ATS-001", Ats, "normal", 720.0, 260.0, 70.0, 60.0),
        ("ups-001", "UPS-001", Ups, "on", 100.0, 420.0, 70.0, 60.0),
    ];

    let mut snapshot = Snapshot::new("Demo - Data Center Mechanical Room");
    for (id, name, ty, normal, x, y, w, h) in items {
        let mut e = Equipment::new(id, name, ty);
        e.normal_position = normal.to_string();
        e.current_position = if ABNORMAL_IDS.contains(&id) {
            opposite_position(normal).to_string()
        } else {
            normal.to_string()
        };
        e.x = x;
        e.y = y;
        e.width = w;
        e.height = h;
        snapshot.equipment.push(e);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_model::EquipmentStatus;

    #[test]
    fn demo_has_three_abnormal_items() {
        let snapshot = demo_snapshot();
        assert_eq!(snapshot.equipment.len(), 12);
        let abnormal: Vec<_> = snapshot
            .equipment
            .iter()
            .filter(|e| e.status() == EquipmentStatus::Abnormal)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(abnormal, ABNORMAL_IDS);
        crate::validate_snapshot(&snapshot).unwrap();
    }

    #[test]
    fn demo_positions_are_valid_options() {
        for e in demo_snapshot().equipment {
            assert!(e.is_valid_position(&e.current_position), "{}", e.id);
            assert!(e.is_valid_position(&e.normal_position), "{}", e.id);
        }
    }
}
