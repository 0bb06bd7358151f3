//! Pointer, keyboard and selection entry points.

use pb_core::{Point, Rect};
use tracing::debug;

use super::DiagramController;
use crate::keys::Shortcut;
use crate::tools::{PickOutcome, Tool};

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected,
    SelectionCleared,
    ConnectionStarted,
    ConnectionCreated(String),
    EquipmentPlaced(String),
    LabelPlaced(String),
}

/// What Escape cancelled, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeAction {
    CancelledDrag,
    CancelledConnectionDraw,
    ClearedConnection,
    ClearedGroup,
    ClearedLabel,
    ClearedEquipment,
    LeftConnectionTool,
    ResetTool,
    Nothing,
}

const NEW_LABEL_TEXT: &str = "Label";

impl DiagramController {
    /// With a connection tool active in edit mode the click feeds the
    /// drawing machine; otherwise it selects.
    pub fn click_equipment(&mut self, id: &str, additive: bool) -> ClickOutcome {
        if self.diagram.equipment(id).is_none() {
            debug!(%id, "click on unknown equipment");
            return ClickOutcome::Ignored;
        }
        if self.is_edit_mode() && self.tools.connection_type().is_some() {
            return match self.tools.pick(id) {
                PickOutcome::NotHandled => ClickOutcome::Ignored,
                PickOutcome::Started => ClickOutcome::ConnectionStarted,
                PickOutcome::Completed(request) => match self.create_connection(
                    &request.source,
                    &request.target,
                    request.connection_type,
                    &request.source_anchor,
                    &request.target_anchor,
                ) {
                    Some(id) => ClickOutcome::ConnectionCreated(id),
                    None => ClickOutcome::Ignored,
                },
            };
        }
        if additive {
            self.selection.toggle(id);
        } else {
            self.selection.set_single(id);
        }
        self.sync_selection();
        ClickOutcome::Selected
    }

    /// Placement tools add at `point` in edit mode; the select tool clears
    /// the selection.
    pub fn click_canvas(&mut self, point: Point) -> ClickOutcome {
        self.cursor = Some(point);
        let tool = self.tools.tool();
        match tool {
            Tool::Select => {
                self.clear_selection();
                ClickOutcome::SelectionCleared
            }
            _ if !self.is_edit_mode() => ClickOutcome::Ignored,
            Tool::Place(equipment_type) => {
                ClickOutcome::EquipmentPlaced(self.add_equipment(equipment_type, point.x, point.y))
            }
            Tool::Label => ClickOutcome::LabelPlaced(self.add_label(NEW_LABEL_TEXT, point.x, point.y)),
            Tool::Connect(_) => ClickOutcome::Ignored,
        }
    }

    pub fn select_connection(&mut self, id: &str) -> bool {
        if self.diagram.connection(id).is_none() {
            return false;
        }
        self.selection.select_connection(id);
        self.sync_selection();
        true
    }

    pub fn select_group(&mut self, id: &str) -> bool {
        if self.diagram.group(id).is_none() {
            return false;
        }
        self.selection.select_group(id);
        self.sync_selection();
        true
    }

    pub fn select_label(&mut self, id: &str) -> bool {
        if self.diagram.label(id).is_none() {
            return false;
        }
        self.selection.select_label(id);
        self.sync_selection();
        true
    }

    /// Select every visible equipment.
    pub fn select_all(&mut self) -> usize {
        let ids: Vec<String> = self.visible_equipment().map(|e| e.id.clone()).collect();
        self.selection.select_all(ids.iter().map(String::as_str));
        self.sync_selection();
        ids.len()
    }

    /// Box selection over visible equipment, added to the current selection.
    pub fn select_in_rect(&mut self, rect: Rect) {
        let visible: Vec<_> = self.visible_equipment().cloned().collect();
        self.selection.select_in_rect(rect, &visible);
        self.sync_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.sync_selection();
    }

    /// Cancel the most specific pending thing.
    pub fn escape(&mut self) -> EscapeAction {
        let action = if self.cancel_move() {
            EscapeAction::CancelledDrag
        } else if self.tools.cancel_connection() {
            EscapeAction::CancelledConnectionDraw
        } else if self.selection.connection().is_some() {
            self.selection.clear_connection();
            EscapeAction::ClearedConnection
        } else if self.selection.group().is_some() {
            self.selection.clear_group();
            EscapeAction::ClearedGroup
        } else if self.selection.label().is_some() {
            self.selection.clear_label();
            EscapeAction::ClearedLabel
        } else if self.selection.has_equipment() {
            self.selection.clear_equipment();
            EscapeAction::ClearedEquipment
        } else if self.tools.connection_type().is_some() {
            self.tools.select_tool(Tool::Select);
            EscapeAction::LeftConnectionTool
        } else if self.tools.tool() != Tool::Select {
            self.tools.select_tool(Tool::Select);
            EscapeAction::ResetTool
        } else {
            EscapeAction::Nothing
        };
        self.sync_selection();
        action
    }

    /// Run a keyboard shortcut. Everything but Escape needs edit mode.
    pub fn shortcut(&mut self, shortcut: Shortcut) -> bool {
        if shortcut.requires_edit_mode() && !self.is_edit_mode() {
            debug!(?shortcut, "shortcut ignored outside edit mode");
            return false;
        }
        match shortcut {
            Shortcut::Escape => self.escape() != EscapeAction::Nothing,
            Shortcut::Copy => self.copy() > 0,
            Shortcut::Paste => !self.paste_default().is_empty(),
            Shortcut::SelectAll => self.select_all() > 0,
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Delete => self.delete_current(),
        }
    }
}
