use pb_core::{Point, Rect};
use pb_geometry::*;
use pb_model::{AnchorPoint, Equipment, EquipmentType, Group};

#[test]
fn anchor_snapped_move_keeps_center_on_grid() {
    let grid = GridSettings::new(20.0).unwrap();
    let mut pump = Equipment::new("p", "P", EquipmentType::Pump);
    pump.width = 70.0;
    pump.height = 50.0;
    let offset = anchor_offset(pump.rect(), AnchorPoint::Center);
    let top_left = snap_anchor_to_grid(Point::new(33.0, 47.0), offset, &grid);
    pump.x = top_left.x;
    pump.y = top_left.y;
    let center = pump.center();
    assert_eq!(center.x % 20.0, 0.0);
    assert_eq!(center.y % 20.0, 0.0);
}

#[test]
fn group_built_from_members_contains_them() {
    let mut items = Vec::new();
    for (i, (x, y)) in [(100.0, 100.0), (300.0, 220.0)].into_iter().enumerate() {
        let mut e = Equipment::new(format!("e{i}"), format!("E{i}"), EquipmentType::Valve);
        e.x = x;
        e.y = y;
        items.push(e);
    }
    let mut far = Equipment::new("far", "Far", EquipmentType::Valve);
    far.x = 1000.0;
    items.push(far);

    let bounds = group_bounds(
        items[..2].iter().map(Equipment::rect),
        GroupPadding::default(),
    )
    .unwrap();
    let mut groups = vec![Group::new("g", "Group 1", bounds)];
    refresh_memberships(&mut groups, &items);
    assert_eq!(groups[0].equipment_ids.len(), 2);
    assert!(!groups[0].contains_member("far"));

    groups[0].set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    refresh_memberships(&mut groups, &items);
    assert!(groups[0].equipment_ids.is_empty());
}
