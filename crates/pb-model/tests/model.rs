use pb_model::*;
use proptest::prelude::*;

#[test]
fn selection_flag_is_not_persisted() {
    let mut valve = Equipment::new("v1", "V-1", EquipmentType::Valve);
    valve.is_selected = true;
    valve.is_loto = true;
    let json = serde_json::to_string(&valve).unwrap();
    assert!(!json.contains("is_selected"));
    assert!(json.contains("\"type\":\"Valve\""));

    let back: Equipment = serde_json::from_str(&json).unwrap();
    assert!(!back.is_selected);
    assert!(back.is_loto);
}

#[test]
fn acronym_types_serialize_upper_case() {
    let ups = Equipment::new("u", "UPS-1", EquipmentType::Ups);
    let json = serde_json::to_value(&ups).unwrap();
    assert_eq!(json["type"], "UPS");
    let parsed: EquipmentType = serde_json::from_str("\"STS\"").unwrap();
    assert_eq!(parsed, EquipmentType::Sts);
}

#[test]
fn new_equipment_uses_type_defaults() {
    for ty in EquipmentType::ALL {
        let e = Equipment::new("id", "name", ty);
        assert_eq!(e.normal_position, ty.default_normal_position());
        assert_eq!(e.current_position, e.normal_position);
        assert_eq!((e.width, e.height), ty.default_size());
        assert_eq!(e.status(), EquipmentStatus::Normal);
        assert_eq!(e.layer_id, DEFAULT_LAYER_ID);
    }
}

#[test]
fn derived_status_follows_position_edits() {
    let mut pump = Equipment::new("p", "P-1", EquipmentType::Pump);
    assert_eq!(pump.status(), EquipmentStatus::Normal);
    pump.current_position = "on".into();
    assert_eq!(pump.status(), EquipmentStatus::Abnormal);
    pump.normal_position = "ON".into();
    assert_eq!(pump.status(), EquipmentStatus::Normal);
}

fn arb_type() -> impl Strategy<Value = EquipmentType> {
    (0..EquipmentType::ALL.len()).prop_map(|i| EquipmentType::ALL[i])
}

proptest! {
    #[test]
    fn matching_positions_are_always_normal(ty in arb_type(), pick in 0usize..4, upper in any::<bool>()) {
        let options = ty.position_options();
        let position = options[pick % options.len()];
        let mut e = Equipment::new("e", "E", ty);
        e.normal_position = position.to_string();
        e.current_position = if upper { position.to_uppercase() } else { position.to_string() };
        prop_assert_eq!(e.status(), EquipmentStatus::Normal);
    }

    #[test]
    fn differing_valid_positions_are_never_normal(ty in arb_type(), a in 0usize..4, b in 0usize..4) {
        let options = ty.position_options();
        let normal = options[a % options.len()];
        let current = options[b % options.len()];
        prop_assume!(normal != current);
        let mut e = Equipment::new("e", "E", ty);
        e.normal_position = normal.to_string();
        e.current_position = current.to_string();
        let status = e.status();
        prop_assert!(status == EquipmentStatus::Abnormal || status == EquipmentStatus::Warning);
        let warning = ["standby", "bypass", "test"].contains(&current);
        prop_assert_eq!(status == EquipmentStatus::Warning, warning);
    }
}
