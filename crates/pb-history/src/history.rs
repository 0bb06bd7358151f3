//! Undo and redo stacks.

use std::collections::VecDeque;

use crate::command::Command;

pub const DEFAULT_CAPACITY: usize = 100;

/// Availability of undo and redo, reported to the listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

type Listener = Box<dyn FnMut(HistoryState)>;

/// Bounded undo stack plus redo stack.
///
/// Recording a new command discards everything that could be redone. When
/// the undo stack grows past its capacity the oldest command is dropped.
pub struct History<T> {
    undo_stack: VecDeque<Command<T>>,
    redo_stack: Vec<Command<T>>,
    capacity: usize,
    listener: Option<Listener>,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(HistoryState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Push an already applied command.
    pub fn record(&mut self, command: Command<T>) {
        self.undo_stack.push_back(command);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.notify();
    }

    /// Revert the newest command. Returns false when there is nothing to undo.
    pub fn undo(&mut self, target: &mut T) -> bool {
        let Some(command) = self.undo_stack.pop_back() else {
            return false;
        };
        command.undo(target);
        self.redo_stack.push(command);
        self.notify();
        true
    }

    /// Re-apply the newest undone command. Returns false when there is nothing to redo.
    pub fn redo(&mut self, target: &mut T) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        command.redo(target);
        self.undo_stack.push_back(command);
        self.notify();
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(Command::description)
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(Command::description)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    fn notify(&mut self) {
        let state = self.state();
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> std::fmt::Debug for History<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
