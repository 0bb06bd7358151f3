//! Editing layer for plantboard diagrams.
//!
//! This crate owns the live diagram and every interactive operation on it:
//! placing, moving, connecting, grouping, layering, clipboard, undo/redo and
//! the keyboard / tool state machines. Derived state (connection endpoints,
//! group membership, energization) is recomputed after each change.

pub mod commands;
pub mod config;
pub mod controller;
pub mod diagram;
pub mod error;
pub mod keys;
pub mod selection;
pub mod tools;

// Re-export key types for convenience
pub use config::EditorConfig;
pub use controller::{ClickOutcome, DiagramController, EscapeAction, StatusCounts};
pub use diagram::{Diagram, Entity, EntityKind, GeometrySnapshot};
pub use error::{EditorError, EditorResult};
pub use keys::Shortcut;
pub use selection::{Clipboard, PasteBatch, PastePlacement, Selection};
pub use tools::{ConnectionDraw, ConnectionRequest, EditorMode, PickOutcome, Tool, ToolState};
