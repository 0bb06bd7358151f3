//! The diagram controller.
//!
//! Every editing operation applies its change to the live [`Diagram`],
//! records one undo command, then runs the same follow-up:
//! - connection endpoints and group memberships are recomputed
//! - energization is recalculated
//! - entity selection flags are synced
//! - the snapshot is auto-saved when a store is attached
//!
//! Auto-save is best effort: failures are logged and the in-memory state is
//! kept. While a drag session is open, intermediate moves refresh derived
//! state but neither record nor save.

mod clipboard;
mod connections;
mod equipment;
mod geometry;
mod groups;
mod interaction;
mod labels;
mod layers;

pub use interaction::{ClickOutcome, EscapeAction};

use pb_core::Point;
use pb_geometry::GridSettings;
use pb_history::{History, HistoryState};
use pb_model::{Connection, DEFAULT_LAYER_ID, Equipment, EquipmentStatus, Group, Label};
use pb_project::{Snapshot, SnapshotStore, normalize_layers};
use tracing::{debug, info, warn};

use crate::commands::DiagramCommand;
use crate::config::EditorConfig;
use crate::diagram::{Diagram, GeometrySnapshot};
use crate::error::{EditorError, EditorResult};
use crate::selection::{Clipboard, Selection};
use crate::tools::{EditorMode, Tool, ToolState};

/// Equipment counts per derived status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub normal: usize,
    pub abnormal: usize,
    pub warning: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.normal + self.abnormal + self.warning + self.unknown
    }
}

struct DragSession {
    before: GeometrySnapshot,
}

pub struct DiagramController {
    diagram: Diagram,
    history: History<Diagram>,
    selection: Selection,
    clipboard: Clipboard,
    tools: ToolState,
    config: EditorConfig,
    grid: GridSettings,
    active_layer: String,
    drag: Option<DragSession>,
    store: Option<Box<dyn SnapshotStore>>,
    /// Set when the store could not be read; cleared by an explicit save.
    autosave_held: bool,
    cursor: Option<Point>,
}

impl DiagramController {
    /// Empty diagram, no store attached.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let mut controller = Self {
            diagram: Diagram::default(),
            history: History::new(config.undo_capacity),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            tools: ToolState::new(),
            config,
            grid,
            active_layer: DEFAULT_LAYER_ID.to_string(),
            drag: None,
            store: None,
            autosave_held: false,
            cursor: None,
        };
        controller.refresh_derived();
        Ok(controller)
    }

    /// Load whatever `store` holds and keep auto-saving into it. A missing
    /// snapshot yields an empty diagram. An unreadable one also yields an
    /// empty diagram, but auto-save stays off until an explicit
    /// [`save`](Self::save) so the stored file is not overwritten.
    pub fn open(config: EditorConfig, store: Box<dyn SnapshotStore>) -> EditorResult<Self> {
        let mut controller = Self::new(config)?;
        match store.load() {
            Ok(Some(snapshot)) => controller.load_snapshot(snapshot),
            Ok(None) => debug!("nothing saved yet, starting with an empty diagram"),
            Err(err) => {
                warn!(%err, "failed to load saved diagram, starting empty with auto-save off");
                controller.autosave_held = true;
            }
        }
        controller.store = Some(store);
        Ok(controller)
    }

    pub fn attach_store(&mut self, store: Box<dyn SnapshotStore>) {
        self.store = Some(store);
        self.autosave_held = false;
    }

    /// False while auto-save is held back after a failed load.
    pub fn autosave_enabled(&self) -> bool {
        self.store.is_some() && !self.autosave_held
    }

    /// Replace the whole diagram. Undo history and selection are dropped.
    pub fn load_snapshot(&mut self, mut snapshot: Snapshot) {
        normalize_layers(&mut snapshot);
        self.diagram = Diagram::from_snapshot(snapshot);
        self.history.clear();
        self.selection.clear();
        self.selection.end_move();
        self.drag = None;
        self.tools.cancel_connection();
        let summary = self.refresh_derived();
        info!(
            project = %self.diagram.project_name,
            equipment = self.diagram.equipment.len(),
            connections = self.diagram.connections.len(),
            energized = summary,
            "diagram loaded"
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        self.diagram.to_snapshot()
    }

    /// Explicit save. Unlike auto-save, failures are returned. `Ok(false)`
    /// when no store is attached. A successful save turns auto-save back on.
    pub fn save(&mut self) -> EditorResult<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        store.save(&self.diagram.to_snapshot())?;
        self.autosave_held = false;
        Ok(true)
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    pub fn active_layer(&self) -> &str {
        &self.active_layer
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn set_cursor(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    /// Called with the new undo/redo availability after every change.
    pub fn set_history_listener(&mut self, listener: impl FnMut(HistoryState) + 'static) {
        self.history.set_listener(listener);
    }

    pub fn mode(&self) -> EditorMode {
        self.tools.mode()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.tools.is_edit_mode()
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.tools.set_mode(mode);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    pub fn set_pending_anchors(&mut self, source: &str, target: &str) {
        self.tools.set_pending_anchors(source, target);
    }

    /// An open drag is committed first, so undo reverts the drag itself.
    pub fn undo(&mut self) -> bool {
        self.end_move();
        if !self.history.undo(&mut self.diagram) {
            debug!("nothing to undo");
            return false;
        }
        self.after_change();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.end_move();
        if !self.history.redo(&mut self.diagram) {
            debug!("nothing to redo");
            return false;
        }
        self.after_change();
        true
    }

    /// Rejected sizes leave the current grid untouched.
    pub fn set_grid_size(&mut self, size: f64) -> EditorResult<()> {
        let grid =
            GridSettings::new(size).map_err(|_| EditorError::InvalidGridSize { size })?;
        self.config.grid_size = size;
        self.grid = if self.config.snap_enabled {
            grid
        } else {
            grid.disabled()
        };
        Ok(())
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.config.snap_enabled = enabled;
        self.grid.enabled = enabled;
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for e in &self.diagram.equipment {
            match e.status() {
                EquipmentStatus::Normal => counts.normal += 1,
                EquipmentStatus::Abnormal => counts.abnormal += 1,
                EquipmentStatus::Warning => counts.warning += 1,
                EquipmentStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn visible_equipment(&self) -> impl Iterator<Item = &Equipment> + '_ {
        self.diagram
            .equipment
            .iter()
            .filter(|e| self.diagram.is_layer_visible(&e.layer_id))
    }

    /// Connections on a visible layer whose existing endpoints are visible too.
    pub fn visible_connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        let endpoint_visible = |id: &str| {
            self.diagram
                .equipment(id)
                .is_none_or(|e| self.diagram.is_layer_visible(&e.layer_id))
        };
        self.diagram.connections.iter().filter(move |c| {
            self.diagram.is_layer_visible(&c.layer_id)
                && endpoint_visible(&c.source_equipment_id)
                && endpoint_visible(&c.target_equipment_id)
        })
    }

    pub fn visible_groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.diagram
            .groups
            .iter()
            .filter(|g| self.diagram.is_layer_visible(&g.layer_id))
    }

    pub fn visible_labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.diagram
            .labels
            .iter()
            .filter(|l| self.diagram.is_layer_visible(&l.layer_id))
    }

    /// Push an already applied command, then refresh and save.
    fn record(&mut self, command: DiagramCommand) {
        self.history.record(command);
        self.after_change();
    }

    fn after_change(&mut self) {
        self.refresh_derived();
        self.autosave();
    }

    /// Recompute derived state without recording or saving. Returns the
    /// number of energized equipment.
    fn refresh_derived(&mut self) -> usize {
        if self.diagram.layer(&self.active_layer).is_none() {
            self.active_layer = DEFAULT_LAYER_ID.to_string();
        }
        let summary = self.diagram.refresh();
        self.sync_selection();
        summary.energized_equipment
    }

    fn sync_selection(&mut self) {
        let d = &mut self.diagram;
        self.selection
            .retain_existing(&d.equipment, &d.connections, &d.groups, &d.labels);
        self.selection.sync_flags(
            &mut d.equipment,
            &mut d.connections,
            &mut d.groups,
            &mut d.labels,
        );
    }

    fn autosave(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if self.autosave_held {
            debug!("auto-save held after failed load");
            return;
        }
        if let Err(err) = store.save(&self.diagram.to_snapshot()) {
            warn!(%err, "auto-save failed, keeping in-memory state");
        }
    }
}
