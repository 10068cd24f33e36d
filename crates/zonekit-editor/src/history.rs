//! Linear undo/redo history with macro grouping and clean tracking.
//!
//! A command list plus a current index: `push` executes the command
//! immediately, truncates any abandoned redo tail, and appends. Macros
//! group the commands pushed between `begin_macro`/`end_macro` into one
//! atomic entry. The clean marker names the index at which the document
//! was last saved, so undoing past a save and redoing back restores the
//! clean state.
//!
//! History does not survive layout boundaries: loading a layout clears
//! the stack.

use crate::commands::EditorCommand;
use crate::selection::SelectionModel;
use crate::zone_store::ZoneStore;

#[derive(Debug)]
struct MacroFrame {
    label: String,
    commands: Vec<EditorCommand>,
}

/// Bounded-depth command history.
#[derive(Debug)]
pub struct UndoController {
    entries: Vec<EditorCommand>,
    /// Number of applied entries; `entries[..index]` is the undo side.
    index: usize,
    /// Index at which the document matches its saved state.
    clean_index: Option<usize>,
    open_macros: Vec<MacroFrame>,
    limit: usize,
}

impl UndoController {
    /// Creates an empty history bounded to `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            clean_index: Some(0),
            open_macros: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Executes `command` and records it.
    ///
    /// Inside an open macro the command joins the macro; otherwise the
    /// redo tail is truncated and the command becomes the newest entry.
    pub fn push(
        &mut self,
        command: EditorCommand,
        store: &mut ZoneStore,
        selection: &mut SelectionModel,
    ) {
        command.apply(store, selection);
        if let Some(frame) = self.open_macros.last_mut() {
            frame.commands.push(command);
        } else {
            self.commit(command);
        }
    }

    fn commit(&mut self, command: EditorCommand) {
        if let Some(clean) = self.clean_index {
            // A truncated clean point can never be reached again.
            if clean > self.index {
                self.clean_index = None;
            }
        }
        self.entries.truncate(self.index);
        self.entries.push(command);
        self.index += 1;

        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.index -= 1;
            self.clean_index = match self.clean_index {
                Some(0) => None,
                Some(clean) => Some(clean - 1),
                None => None,
            };
        }
    }

    /// Opens a macro; subsequent pushes join it until the matching
    /// `end_macro`. Macros nest.
    pub fn begin_macro(&mut self, label: impl Into<String>) {
        self.open_macros.push(MacroFrame {
            label: label.into(),
            commands: Vec::new(),
        });
    }

    /// Closes the most recent macro. An empty macro is discarded; an
    /// unmatched end is a programming error and is ignored with a
    /// warning.
    pub fn end_macro(&mut self) {
        let Some(frame) = self.open_macros.pop() else {
            tracing::warn!("end_macro without matching begin_macro");
            return;
        };
        if frame.commands.is_empty() {
            return;
        }
        let command = EditorCommand::Macro {
            label: frame.label,
            commands: frame.commands,
        };
        if let Some(outer) = self.open_macros.last_mut() {
            outer.commands.push(command);
        } else {
            self.commit(command);
        }
    }

    /// Whether a macro bracket is currently open.
    pub fn in_macro(&self) -> bool {
        !self.open_macros.is_empty()
    }

    /// Reverts the newest applied entry. No-op at the bottom of the
    /// stack or while a macro is open.
    pub fn undo(&mut self, store: &mut ZoneStore, selection: &mut SelectionModel) -> bool {
        if self.index == 0 || self.in_macro() {
            return false;
        }
        self.index -= 1;
        self.entries[self.index].undo(store, selection);
        true
    }

    /// Re-applies the next undone entry. No-op at the top of the stack
    /// or while a macro is open.
    pub fn redo(&mut self, store: &mut ZoneStore, selection: &mut SelectionModel) -> bool {
        if self.index == self.entries.len() || self.in_macro() {
            return false;
        }
        self.entries[self.index].apply(store, selection);
        self.index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0 && !self.in_macro()
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.entries.len() && !self.in_macro()
    }

    /// Label of the entry `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .map(|index| self.entries[index].label())
    }

    /// Label of the entry `redo` would re-apply.
    pub fn redo_label(&self) -> Option<&str> {
        self.entries.get(self.index).map(|entry| entry.label())
    }

    /// Number of entries available to undo.
    pub fn undo_depth(&self) -> usize {
        self.index
    }

    /// Number of entries available to redo.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.index
    }

    /// Marks the current index as the saved point.
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    /// Whether the history sits exactly at the saved point.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    /// Drops all history. Used when loading a new layout; the fresh
    /// document starts clean.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
        self.clean_index = Some(0);
        if !self.open_macros.is_empty() {
            tracing::warn!("history cleared while a macro was open");
            self.open_macros.clear();
        }
    }
}
