//! pb-history: generic undo/redo.
//!
//! Commands are pairs of closures over a target type `T`; the history never
//! looks inside them. Closures capture value snapshots taken when the
//! command is built, so a command stays valid however the target changes
//! in between, as long as undo and redo are applied in stack order.

pub mod command;
pub mod history;

pub use command::{Action, Command};
pub use history::{DEFAULT_CAPACITY, History, HistoryState};
