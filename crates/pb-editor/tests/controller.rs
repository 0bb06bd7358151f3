//! Controller scenarios spanning editing, undo, propagation and persistence.

use std::cell::Cell;
use std::rc::Rc;

use pb_core::{Point, Rect};
use pb_editor::{
    ClickOutcome, DiagramController, EditorConfig, EditorError, EditorMode, EscapeAction,
    PastePlacement, Shortcut, Tool,
};
use pb_model::{ConnectionType, DEFAULT_LAYER_ID, EquipmentType, RoutingMode};
use pb_project::{JsonFileStore, MemoryStore, ProjectError, ProjectResult, Snapshot, SnapshotStore, demo_snapshot};

fn unsnapped() -> EditorConfig {
    EditorConfig {
        snap_enabled: false,
        ..EditorConfig::default()
    }
}

fn editor() -> DiagramController {
    let mut editor = DiagramController::new(unsnapped()).unwrap();
    editor.set_mode(EditorMode::Edit);
    editor
}

struct FailingStore;

impl SnapshotStore for FailingStore {
    fn save(&self, _snapshot: &Snapshot) -> ProjectResult<()> {
        Err(ProjectError::Io(std::io::Error::other("disk full")))
    }

    fn load(&self) -> ProjectResult<Option<Snapshot>> {
        Err(ProjectError::Io(std::io::Error::other("unreadable")))
    }
}

#[test]
fn placement_snaps_grid_anchor() {
    let mut editor = DiagramController::new(EditorConfig::default()).unwrap();
    // Valve is 50x50 with a center anchor: (15, 15) puts the center at
    // (40, 40), already on the grid.
    let id = editor.add_equipment(EquipmentType::Valve, 15.0, 15.0);
    let valve = editor.diagram().equipment(&id).unwrap();
    assert_eq!((valve.x, valve.y), (15.0, 15.0));
    assert_eq!(valve.name, "Valve-1");
    assert_eq!(valve.current_position, "open");
    assert_eq!(valve.layer_id, DEFAULT_LAYER_ID);

    let id = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let valve = editor.diagram().equipment(&id).unwrap();
    // Center (25, 25) snaps to (20, 20).
    assert_eq!((valve.x, valve.y), (-5.0, -5.0));
}

#[test]
fn generator_and_breaker_energization() {
    let mut editor = editor();
    let generator = editor.add_equipment(EquipmentType::Generator, 0.0, 0.0);
    let breaker = editor.add_equipment(EquipmentType::Breaker, 200.0, 0.0);
    let motor = editor.add_equipment(EquipmentType::Motor, 400.0, 0.0);
    let feed = editor
        .create_connection(&generator, &breaker, ConnectionType::Electrical, "Center", "Center")
        .unwrap();
    let load = editor
        .create_connection(&breaker, &motor, ConnectionType::Electrical, "Center", "Center")
        .unwrap();

    assert!(!editor.diagram().equipment(&generator).unwrap().is_energized);

    assert!(editor.set_current_position(&generator, "on"));
    let d = editor.diagram();
    for id in [&generator, &breaker, &motor] {
        assert!(d.equipment(id).unwrap().is_energized, "{id} should be energized");
    }
    assert!(d.connection(&feed).unwrap().is_energized);
    assert!(d.connection(&load).unwrap().is_energized);

    assert!(editor.set_current_position(&breaker, "open"));
    let d = editor.diagram();
    assert!(d.equipment(&generator).unwrap().is_energized);
    assert!(!d.equipment(&breaker).unwrap().is_energized);
    assert!(!d.equipment(&motor).unwrap().is_energized);
    assert!(!d.connection(&load).unwrap().is_energized);

    assert!(editor.undo());
    assert!(editor.diagram().equipment(&motor).unwrap().is_energized);
}

#[test]
fn paste_at_cursor_then_single_undo() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    editor
        .create_connection(&a, &b, ConnectionType::Pipe, "MiddleRight", "MiddleLeft")
        .unwrap();

    editor.click_equipment(&a, false);
    editor.click_equipment(&b, true);
    assert_eq!(editor.copy(), 2);

    editor.set_cursor(Point::new(475.0, 325.0));
    assert!(editor.shortcut(Shortcut::Paste));

    let d = editor.diagram();
    assert_eq!(d.equipment.len(), 4);
    assert_eq!(d.connections.len(), 2);
    let pasted: Vec<String> = editor.selection().equipment_ids().to_vec();
    assert_eq!(pasted.len(), 2);
    assert!(!pasted.contains(&a) && !pasted.contains(&b));

    let copy_a = d.equipment(&pasted[0]).unwrap();
    assert_eq!(copy_a.name, "Valve-1-copy");
    assert_eq!((copy_a.x, copy_a.y), (400.0, 300.0));

    let link = &d.connections[1];
    assert_eq!(link.source_equipment_id, pasted[0]);
    assert_eq!(link.target_equipment_id, pasted[1]);
    assert_eq!(link.source_anchor, "MiddleRight");

    assert!(editor.undo());
    let d = editor.diagram();
    assert_eq!(d.equipment.len(), 2);
    assert_eq!(d.connections.len(), 1);
    assert!(pasted.iter().all(|id| d.equipment(id).is_none()));
    assert!(editor.selection().equipment_ids().is_empty());
}

#[test]
fn paste_with_empty_clipboard_is_noop() {
    let mut editor = editor();
    assert!(editor.paste(PastePlacement::Offset(50.0, 50.0)).is_empty());
    assert_eq!(editor.undo_depth(), 0);
}

#[test]
fn delete_cascades_and_undo_restores_order() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Pump, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    let c = editor.add_equipment(EquipmentType::Pump, 200.0, 0.0);
    editor.create_connection(&a, &b, ConnectionType::Pipe, "Center", "Center");
    editor.create_connection(&b, &c, ConnectionType::Pipe, "Center", "Center");
    let before = editor.diagram().clone();

    editor.click_equipment(&b, false);
    assert!(editor.shortcut(Shortcut::Delete));
    assert_eq!(editor.diagram().equipment.len(), 2);
    assert!(editor.diagram().connections.is_empty());

    assert!(editor.undo());
    assert_eq!(editor.diagram().equipment, before.equipment);
    assert_eq!(editor.diagram().connections, before.connections);
}

#[test]
fn delete_priority_falls_through_to_connection() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    let link = editor
        .create_connection(&a, &b, ConnectionType::Pipe, "Center", "Center")
        .unwrap();
    assert!(editor.select_connection(&link));
    assert!(editor.delete_current());
    assert!(editor.diagram().connections.is_empty());
    assert_eq!(editor.diagram().equipment.len(), 2);
    assert!(!editor.delete_current());
}

#[test]
fn connection_rules() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Breaker, 0.0, 0.0);
    assert!(
        editor
            .create_connection(&a, &a, ConnectionType::Electrical, "Center", "Center")
            .is_none()
    );
    assert!(
        editor
            .create_connection(&a, "ghost", ConnectionType::Electrical, "Center", "Center")
            .is_none()
    );

    let b = editor.add_equipment(EquipmentType::Breaker, 200.0, 0.0);
    let link = editor
        .create_connection(&a, &b, ConnectionType::Electrical, "MiddleRight", "MiddleLeft")
        .unwrap();
    let c = editor.diagram().connection(&link).unwrap();
    // Breaker is 70x50.
    assert_eq!((c.x1, c.y1), (70.0, 25.0));
    assert_eq!((c.x2, c.y2), (200.0, 25.0));

    assert!(editor.set_connection_routing(&link, RoutingMode::Orthogonal));
    assert_eq!(
        editor.diagram().connection(&link).unwrap().routing,
        RoutingMode::Orthogonal
    );
    editor.undo();
    assert_eq!(
        editor.diagram().connection(&link).unwrap().routing,
        RoutingMode::Straight
    );
}

#[test]
fn connection_tool_draws_between_two_clicks() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Generator, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Breaker, 200.0, 0.0);
    editor.select_tool(Tool::Connect(ConnectionType::Electrical));

    assert_eq!(editor.click_equipment(&a, false), ClickOutcome::ConnectionStarted);
    assert_eq!(editor.click_equipment(&a, false), ClickOutcome::Ignored);
    let ClickOutcome::ConnectionCreated(id) = editor.click_equipment(&b, false) else {
        panic!("expected a connection");
    };
    let c = editor.diagram().connection(&id).unwrap();
    assert_eq!(c.source_equipment_id, a);
    assert_eq!(c.target_equipment_id, b);
    assert_eq!(c.connection_type, ConnectionType::Electrical);
}

#[test]
fn escape_priority() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    let link = editor
        .create_connection(&a, &b, ConnectionType::Pipe, "Center", "Center")
        .unwrap();

    editor.select_tool(Tool::Connect(ConnectionType::Pipe));
    editor.click_equipment(&a, false);
    assert_eq!(editor.escape(), EscapeAction::CancelledConnectionDraw);
    assert_eq!(editor.escape(), EscapeAction::LeftConnectionTool);
    assert_eq!(editor.tools().tool(), Tool::Select);

    editor.select_connection(&link);
    assert_eq!(editor.escape(), EscapeAction::ClearedConnection);

    editor.click_equipment(&a, false);
    editor.click_equipment(&b, true);
    assert_eq!(editor.escape(), EscapeAction::ClearedEquipment);
    assert!(!editor.diagram().equipment.iter().any(|e| e.is_selected));

    editor.select_tool(Tool::Label);
    assert_eq!(editor.escape(), EscapeAction::ResetTool);
    assert_eq!(editor.escape(), EscapeAction::Nothing);
}

#[test]
fn view_mode_gates_editing_shortcuts() {
    let mut editor = DiagramController::new(unsnapped()).unwrap();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    editor.click_equipment(&a, false);

    assert!(!editor.shortcut(Shortcut::Undo));
    assert!(!editor.shortcut(Shortcut::Delete));
    assert_eq!(editor.diagram().equipment.len(), 1);
    assert!(editor.shortcut(Shortcut::Escape));

    editor.select_tool(Tool::Place(EquipmentType::Pump));
    assert_eq!(
        editor.click_canvas(Point::new(100.0, 100.0)),
        ClickOutcome::Ignored
    );

    editor.set_mode(EditorMode::Edit);
    editor.select_tool(Tool::Place(EquipmentType::Pump));
    assert!(matches!(
        editor.click_canvas(Point::new(100.0, 100.0)),
        ClickOutcome::EquipmentPlaced(_)
    ));
    assert!(editor.shortcut(Shortcut::Undo));
    assert_eq!(editor.diagram().equipment.len(), 1);
}

#[test]
fn invalid_positions_are_ignored() {
    let mut editor = editor();
    let valve = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let depth = editor.undo_depth();

    assert!(!editor.set_current_position(&valve, "on"));
    assert!(!editor.set_normal_position(&valve, "tripped"));
    assert_eq!(editor.undo_depth(), depth);
    assert!(editor.diagram().history_log.is_empty());

    assert!(editor.set_current_position(&valve, "CLOSED"));
    let v = editor.diagram().equipment(&valve).unwrap();
    assert_eq!(v.current_position, "closed");
    assert!(v.last_updated.is_some());

    let log = &editor.diagram().history_log;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].from_position, "open");
    assert_eq!(log[0].to_position, "closed");
    assert_eq!(log[0].equipment_name, "Valve-1");
    assert_eq!(editor.status_counts().abnormal, 1);
}

#[test]
fn history_log_is_capped() {
    let config = EditorConfig {
        history_log_limit: 3,
        ..unsnapped()
    };
    let mut editor = DiagramController::new(config).unwrap();
    let valve = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    for position in ["closed", "open", "closed", "open", "closed"] {
        editor.set_current_position(&valve, position);
    }
    let log = &editor.diagram().history_log;
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].to_position, "closed");
}

#[test]
fn invalid_grid_size_is_surfaced() {
    let mut editor = editor();
    let err = editor.set_grid_size(0.5).unwrap_err();
    assert!(matches!(err, EditorError::InvalidGridSize { .. }));
    assert_eq!(editor.grid().size(), 20.0);
    editor.set_grid_size(10.0).unwrap();
    assert_eq!(editor.grid().size(), 10.0);
    assert!(!editor.grid().enabled);
}

#[test]
fn drag_session_records_once() {
    let store = MemoryStore::new();
    let mut editor = DiagramController::new(unsnapped()).unwrap();
    editor.attach_store(Box::new(store.clone()));
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    editor.click_equipment(&a, false);
    editor.click_equipment(&b, true);

    let saves = store.save_count();
    let depth = editor.undo_depth();
    editor.begin_move(&[]);
    assert_eq!(editor.drag_selection(10.0, 0.0), 2);
    assert_eq!(editor.drag_selection(30.0, 5.0), 2);
    assert_eq!(store.save_count(), saves);
    assert_eq!(editor.undo_depth(), depth);

    assert!(editor.end_move());
    assert_eq!(editor.undo_depth(), depth + 1);
    assert_eq!(store.save_count(), saves + 1);
    let moved = editor.diagram().equipment(&b).unwrap();
    assert_eq!((moved.x, moved.y), (130.0, 5.0));

    editor.undo();
    let back = editor.diagram().equipment(&b).unwrap();
    assert_eq!((back.x, back.y), (100.0, 0.0));
}

#[test]
fn tiny_drag_is_not_recorded() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let depth = editor.undo_depth();
    editor.begin_move(&[a.as_str()]);
    editor.move_equipment(&a, 0.05, 0.05);
    assert!(!editor.end_move());
    assert_eq!(editor.undo_depth(), depth);
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.x, valve.y), (0.0, 0.0));
}

#[test]
fn tiny_move_outside_drag_is_reverted() {
    let store = MemoryStore::new();
    let mut editor = DiagramController::new(unsnapped()).unwrap();
    editor.attach_store(Box::new(store.clone()));
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let depth = editor.undo_depth();

    assert!(editor.move_equipment(&a, 0.05, 0.0));
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.x, valve.y), (0.0, 0.0));
    assert_eq!(editor.undo_depth(), depth);
    assert_eq!(store.snapshot().unwrap().equipment[0].x, 0.0);
}

#[test]
fn undo_mid_drag_reverts_the_drag() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);

    editor.begin_move(&[a.as_str()]);
    editor.move_equipment(&a, 400.0, 400.0);
    assert!(editor.undo());
    assert!(!editor.is_dragging());
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.x, valve.y), (0.0, 0.0));
    assert_eq!(editor.undo_depth(), 2);
    assert_eq!(editor.redo_description(), Some("Move"));

    assert!(editor.redo());
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.x, valve.y), (400.0, 400.0));
}

#[test]
fn escape_cancels_drag_first() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 200.0, 0.0);
    editor.select_tool(Tool::Connect(ConnectionType::Pipe));
    editor.click_equipment(&b, false);
    assert!(editor.tools().is_drawing());

    let depth = editor.undo_depth();
    editor.begin_move(&[a.as_str()]);
    editor.move_equipment(&a, 50.0, 60.0);
    assert_eq!(editor.escape(), EscapeAction::CancelledDrag);
    assert!(!editor.is_dragging());
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.x, valve.y), (0.0, 0.0));
    assert_eq!(editor.undo_depth(), depth);
    assert!(editor.tools().is_drawing());
    assert_eq!(editor.escape(), EscapeAction::CancelledConnectionDraw);
    assert!(!editor.cancel_move());
}

#[test]
fn drag_moves_the_ids_it_started_with() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    editor.click_equipment(&b, false);

    editor.begin_move(&[a.as_str()]);
    assert_eq!(editor.drag_selection(20.0, 10.0), 1);
    assert!(editor.end_move());
    let moved = editor.diagram().equipment(&a).unwrap();
    assert_eq!((moved.x, moved.y), (20.0, 10.0));
    let still = editor.diagram().equipment(&b).unwrap();
    assert_eq!((still.x, still.y), (100.0, 0.0));
}

#[test]
fn resize_floors_size_and_updates_endpoints() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 200.0, 0.0);
    let link = editor
        .create_connection(&a, &b, ConnectionType::Pipe, "MiddleRight", "MiddleLeft")
        .unwrap();

    assert!(editor.resize_equipment(&a, Rect::new(0.0, 0.0, 10.0, 100.0)));
    let valve = editor.diagram().equipment(&a).unwrap();
    assert_eq!((valve.width, valve.height), (30.0, 100.0));
    let c = editor.diagram().connection(&link).unwrap();
    assert_eq!((c.x1, c.y1), (30.0, 50.0));
}

#[test]
fn locked_layer_blocks_geometry_and_delete() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    assert!(editor.toggle_layer_lock(DEFAULT_LAYER_ID));

    assert!(!editor.move_equipment(&a, 300.0, 300.0));
    editor.click_equipment(&a, false);
    assert_eq!(editor.delete_selection(), 0);
    assert_eq!(editor.diagram().equipment.len(), 1);
}

#[test]
fn group_membership_follows_geometry() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    let b = editor.add_equipment(EquipmentType::Valve, 100.0, 0.0);
    let outsider = editor.add_equipment(EquipmentType::Valve, 600.0, 600.0);

    editor.click_equipment(&a, false);
    assert!(editor.create_group().is_none());
    editor.click_equipment(&b, true);
    let group = editor.create_group().unwrap();
    assert_eq!(editor.selection().group(), Some(group.as_str()));

    let g = editor.diagram().group(&group).unwrap();
    assert_eq!(g.name, "Group 1");
    assert_eq!(g.rect(), Rect::new(-10.0, -30.0, 170.0, 90.0));
    assert!(g.contains_member(&a) && g.contains_member(&b));
    assert!(!g.contains_member(&outsider));

    assert!(editor.move_group(&group, 40.0, 0.0));
    let moved = editor.diagram().equipment(&a).unwrap();
    assert_eq!((moved.x, moved.y), (40.0, 0.0));

    editor.move_equipment(&a, 1000.0, 1000.0);
    assert!(!editor.diagram().group(&group).unwrap().contains_member(&a));

    editor.move_equipment(&outsider, 60.0, 0.0);
    assert!(editor.diagram().group(&group).unwrap().contains_member(&outsider));

    editor.undo();
    editor.undo();
    editor.undo();
    let a_back = editor.diagram().equipment(&a).unwrap();
    assert_eq!((a_back.x, a_back.y), (0.0, 0.0));
    assert!(editor.diagram().group(&group).unwrap().contains_member(&a));
}

#[test]
fn layers_filter_and_reassign() {
    let mut editor = editor();
    let pumps = editor.add_layer("Pumps");
    assert_eq!(pumps, "layer-1");
    assert!(editor.set_active_layer(&pumps));
    let p = editor.add_equipment(EquipmentType::Pump, 0.0, 0.0);
    assert_eq!(editor.diagram().equipment(&p).unwrap().layer_id, pumps);

    assert!(editor.toggle_layer_visibility(&pumps));
    assert_eq!(editor.visible_equipment().count(), 0);
    assert_eq!(editor.diagram().equipment.len(), 1);
    editor.toggle_layer_visibility(&pumps);

    assert!(!editor.delete_layer(DEFAULT_LAYER_ID));
    assert!(editor.delete_layer(&pumps));
    assert_eq!(editor.active_layer(), DEFAULT_LAYER_ID);
    assert_eq!(
        editor.diagram().equipment(&p).unwrap().layer_id,
        DEFAULT_LAYER_ID
    );

    assert!(editor.undo());
    assert!(editor.diagram().layer(&pumps).is_some());
    assert_eq!(editor.diagram().equipment(&p).unwrap().layer_id, pumps);
}

#[test]
fn labels_snap_and_undo() {
    let mut editor = DiagramController::new(EditorConfig::default()).unwrap();
    let label = editor.add_label("Pump room", 33.0, 47.0);
    let l = editor.diagram().label(&label).unwrap();
    assert_eq!((l.x, l.y), (40.0, 40.0));

    assert!(editor.set_label_text(&label, "Chiller room"));
    assert!(editor.move_label(&label, 100.0, 100.0));
    editor.undo();
    editor.undo();
    assert_eq!(editor.diagram().label(&label).unwrap().text, "Pump room");
    assert!(editor.delete_label(&label));
    assert!(editor.diagram().labels.is_empty());
}

#[test]
fn undo_redo_restores_identical_state() {
    let mut editor = editor();
    let a = editor.add_equipment(EquipmentType::Ups, 0.0, 0.0);
    editor.rename_equipment(&a, "UPS-A");
    editor.set_notes(&a, "feeds row 3");
    editor.set_loto(&a, true);
    let after = editor.diagram().equipment.clone();

    for _ in 0..3 {
        assert!(editor.undo());
    }
    assert_eq!(editor.diagram().equipment(&a).unwrap().name, "UPS-1");
    for _ in 0..3 {
        assert!(editor.redo());
    }
    assert_eq!(editor.diagram().equipment, after);
    assert!(!editor.redo());
}

#[test]
fn undo_depth_is_bounded() {
    let mut editor = editor();
    for i in 0..105 {
        editor.add_label(&format!("note {i}"), 0.0, 0.0);
    }
    assert_eq!(editor.undo_depth(), 100);
    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 100);
    assert_eq!(editor.diagram().labels.len(), 5);
}

#[test]
fn history_listener_sees_availability() {
    let state = Rc::new(Cell::new((false, false)));
    let seen = Rc::clone(&state);
    let mut editor = editor();
    editor.set_history_listener(move |s| seen.set((s.can_undo, s.can_redo)));

    editor.add_equipment(EquipmentType::Valve, 0.0, 0.0);
    assert_eq!(state.get(), (true, false));
    editor.undo();
    assert_eq!(state.get(), (false, true));
}

#[test]
fn autosave_failure_keeps_state() {
    let mut editor = DiagramController::open(unsnapped(), Box::new(FailingStore)).unwrap();
    assert!(editor.diagram().equipment.is_empty());
    let id = editor.add_equipment(EquipmentType::Pump, 0.0, 0.0);
    assert!(editor.diagram().equipment(&id).is_some());
    assert!(editor.save().is_err());
}

#[test]
fn unreadable_file_is_not_overwritten() {
    let path = std::env::temp_dir().join("pb_editor_unreadable.json");
    let content = r#"{"equipment": [
        {"id": "v1", "name": "V-1", "type": "Valve"},
        {"id": "v1", "name": "V-1 again", "type": "Valve"}
    ]}"#;
    std::fs::write(&path, content).unwrap();

    let mut editor = DiagramController::open(unsnapped(), Box::new(JsonFileStore::new(&path))).unwrap();
    assert!(editor.diagram().equipment.is_empty());
    assert!(!editor.autosave_enabled());
    editor.add_label("note", 0.0, 0.0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

    assert!(editor.save().unwrap());
    assert!(editor.autosave_enabled());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unknown_version_field_still_loads() {
    let path = std::env::temp_dir().join("pb_editor_versioned.json");
    std::fs::write(
        &path,
        r#"{"version": 2, "equipment": [{"id": "v1", "name": "V-1", "type": "Valve"}]}"#,
    )
    .unwrap();

    let mut editor = DiagramController::open(unsnapped(), Box::new(JsonFileStore::new(&path))).unwrap();
    assert_eq!(editor.diagram().equipment.len(), 1);
    assert!(editor.autosave_enabled());
    editor.add_label("note", 0.0, 0.0);
    let reloaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.equipment.len(), 1);
    assert_eq!(reloaded.labels.len(), 1);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn reopen_from_store() {
    let store = MemoryStore::new();
    let mut editor = DiagramController::open(unsnapped(), Box::new(store.clone())).unwrap();
    let a = editor.add_equipment(EquipmentType::Chiller, 0.0, 0.0);
    editor.set_current_position(&a, "unavailable");
    assert!(store.save_count() >= 2);

    let reopened = DiagramController::open(unsnapped(), Box::new(store.clone())).unwrap();
    let chiller = reopened.diagram().equipment(&a).unwrap();
    assert_eq!(chiller.current_position, "unavailable");
    assert_eq!(reopened.diagram().history_log.len(), 1);
    assert_eq!(reopened.undo_depth(), 0);
}

#[test]
fn demo_snapshot_loads() {
    let mut editor = editor();
    editor.load_snapshot(demo_snapshot());
    let counts = editor.status_counts();
    assert_eq!(counts.total(), 12);
    assert_eq!(counts.abnormal, 3);
    assert!(!editor.history_state().can_undo);
    assert_eq!(editor.select_all(), 12);
}
