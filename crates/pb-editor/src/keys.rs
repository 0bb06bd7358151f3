//! Keyboard shortcuts understood by the controller.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Escape,
    Copy,
    Paste,
    SelectAll,
    Undo,
    Redo,
    Delete,
}

impl Shortcut {
    /// Map a key name plus Ctrl state to a shortcut. Letter keys need Ctrl.
    pub fn from_chord(key: &str, ctrl: bool) -> Option<Shortcut> {
        match (key.to_ascii_lowercase().as_str(), ctrl) {
            ("escape" | "esc", _) => Some(Shortcut::Escape),
            ("delete" | "del", _) => Some(Shortcut::Delete),
            ("c", true) => Some(Shortcut::Copy),
            ("v", true) => Some(Shortcut::Paste),
            ("a", true) => Some(Shortcut::SelectAll),
            ("z", true) => Some(Shortcut::Undo),
            ("y", true) => Some(Shortcut::Redo),
            _ => None,
        }
    }

    /// Everything except Escape only acts in edit mode.
    pub fn requires_edit_mode(self) -> bool {
        self != Shortcut::Escape
    }
}
