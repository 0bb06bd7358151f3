//! Undoable commands.

/// A state transition applied to the target.
pub type Action<T> = Box<dyn Fn(&mut T)>;

/// One undoable unit of work.
pub enum Command<T> {
    Atomic {
        description: String,
        undo: Action<T>,
        redo: Action<T>,
    },
    /// Children are redone in order and undone in reverse order.
    Compound {
        description: String,
        commands: Vec<Command<T>>,
    },
}

impl<T> Command<T> {
    pub fn atomic(
        description: impl Into<String>,
        undo: impl Fn(&mut T) + 'static,
        redo: impl Fn(&mut T) + 'static,
    ) -> Self {
        Command::Atomic {
            description: description.into(),
            undo: Box::new(undo),
            redo: Box::new(redo),
        }
    }

    pub fn compound(description: impl Into<String>, commands: Vec<Command<T>>) -> Self {
        Command::Compound {
            description: description.into(),
            commands,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Command::Atomic { description, .. } | Command::Compound { description, .. } => {
                description.as_str()
            }
        }
    }

    /// A compound with no children does nothing either way.
    pub fn is_empty(&self) -> bool {
        match self {
            Command::Atomic { .. } => false,
            Command::Compound { commands, .. } => commands.iter().all(Command::is_empty),
        }
    }

    pub fn undo(&self, target: &mut T) {
        match self {
            Command::Atomic { undo, .. } => undo(target),
            Command::Compound { commands, .. } => {
                for command in commands.iter().rev() {
                    command.undo(target);
                }
            }
        }
    }

    pub fn redo(&self, target: &mut T) {
        match self {
            Command::Atomic { redo, .. } => redo(target),
            Command::Compound { commands, .. } => {
                for command in commands {
                    command.redo(target);
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Atomic { description, .. } => {
                f.debug_struct("Atomic").field("description", description).finish()
            }
            Command::Compound {
                description,
                commands,
            } => f
                .debug_struct("Compound")
                .field("description", description)
                .field("commands", commands)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(value: i32) -> Command<Vec<i32>> {
        Command::atomic(
            format!("push {value}"),
            |v: &mut Vec<i32>| {
                v.pop();
            },
            move |v: &mut Vec<i32>| v.push(value),
        )
    }

    #[test]
    fn compound_undoes_in_reverse() {
        let cmd = Command::compound("push three", vec![push(1), push(2), push(3)]);
        let mut target = Vec::new();
        cmd.redo(&mut target);
        assert_eq!(target, vec![1, 2, 3]);
        cmd.undo(&mut target);
        assert!(target.is_empty());
    }

    #[test]
    fn empty_compound() {
        let cmd: Command<Vec<i32>> = Command::compound("nothing", Vec::new());
        assert!(cmd.is_empty());
        assert!(!push(1).is_empty());
        assert_eq!(cmd.description(), "nothing");
    }
}
