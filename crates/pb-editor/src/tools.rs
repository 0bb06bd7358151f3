//! Edit mode, active tool and the connection drawing state machine.

use pb_model::{AnchorPoint, ConnectionType, EquipmentType};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    View,
    Edit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Select,
    /// Click on the canvas places a new item of this type.
    Place(EquipmentType),
    /// Click on the canvas places a text label.
    Label,
    /// Two equipment clicks draw a connection of this type.
    Connect(ConnectionType),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionDraw {
    #[default]
    Idle,
    SourcePicked {
        source: String,
        source_anchor: String,
    },
}

/// A finished pick pair, ready to become a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub source: String,
    pub target: String,
    pub connection_type: ConnectionType,
    pub source_anchor: String,
    pub target_anchor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not in connection mode, or the source was clicked again.
    NotHandled,
    Started,
    Completed(ConnectionRequest),
}

fn center() -> String {
    AnchorPoint::Center.name().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolState {
    mode: EditorMode,
    tool: Tool,
    draw: ConnectionDraw,
    pending_source_anchor: String,
    pending_target_anchor: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: EditorMode::default(),
            tool: Tool::default(),
            draw: ConnectionDraw::default(),
            pending_source_anchor: center(),
            pending_target_anchor: center(),
        }
    }
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        self.mode == EditorMode::Edit
    }

    /// Leaving edit mode falls back to the select tool and drops any
    /// half-drawn connection.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        if mode == EditorMode::View {
            self.tool = Tool::Select;
            self.cancel_connection();
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.cancel_connection();
    }

    pub fn connection_type(&self) -> Option<ConnectionType> {
        match self.tool {
            Tool::Connect(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn draw_state(&self) -> &ConnectionDraw {
        &self.draw
    }

    pub fn is_drawing(&self) -> bool {
        self.draw != ConnectionDraw::Idle
    }

    pub fn pending_anchors(&self) -> (&str, &str) {
        (&self.pending_source_anchor, &self.pending_target_anchor)
    }

    pub fn set_pending_anchors(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.pending_source_anchor = source.into();
        self.pending_target_anchor = target.into();
    }

    /// Feed one equipment click into the drawing machine.
    pub fn pick(&mut self, equipment_id: &str) -> PickOutcome {
        let Some(connection_type) = self.connection_type() else {
            return PickOutcome::NotHandled;
        };
        match &self.draw {
            ConnectionDraw::Idle => {
                self.draw = ConnectionDraw::SourcePicked {
                    source: equipment_id.to_string(),
                    source_anchor: self.pending_source_anchor.clone(),
                };
                PickOutcome::Started
            }
            ConnectionDraw::SourcePicked { source, .. } if source == equipment_id => {
                PickOutcome::NotHandled
            }
            ConnectionDraw::SourcePicked {
                source,
                source_anchor,
            } => {
                let request = ConnectionRequest {
                    source: source.clone(),
                    target: equipment_id.to_string(),
                    connection_type,
                    source_anchor: source_anchor.clone(),
                    target_anchor: self.pending_target_anchor.clone(),
                };
                self.cancel_connection();
                PickOutcome::Completed(request)
            }
        }
    }

    /// Drop pending drawing state. Returns true when something was pending.
    pub fn cancel_connection(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.draw = ConnectionDraw::Idle;
        self.pending_source_anchor = center();
        self.pending_target_anchor = center();
        was_drawing
    }
}
