// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use log::{debug, warn};

use crate::commands::{Outcome, UndoableCommand};
use crate::CommandError;

/// A minimal host-side undo stack for finished commands.
///
/// Commands are recorded after they have been performed; the stack never executes them itself.
/// Undoing moves a cursor back through the history and redoing moves it forward again.  Recording a
/// new command drops everything after the cursor.
#[derive(Default)]
pub struct UndoStack {
    history: Vec<Box<dyn UndoableCommand>>,
    next_history_index: usize, // Index of the command to redo next; everything before it is done.
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_history_size(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.next_history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.next_history_index < self.history.len()
    }

    /// Label of the command the next [`undo`](Self::undo) would revert.
    pub fn undo_label(&self) -> Option<String> {
        self.next_history_index
            .checked_sub(1)
            .map(|index| self.history[index].label())
    }

    /// Records a performed command.  Blocked commands did nothing and are refused.
    pub fn push(&mut self, command: Box<dyn UndoableCommand>) -> Result<(), CommandError> {
        if command.is_blocked() {
            warn!("Not recording blocked command: {}", command.label());
            let (path, attribute) = command.target();
            return Err(CommandError::InitializationBlocked { path, attribute });
        }
        if self.history.len() > self.next_history_index {
            self.history.drain(self.next_history_index..);
        }
        debug!("Recording {}", command.label());
        self.history.push(command);
        self.next_history_index = self.history.len();
        Ok(())
    }

    /// Reverts the most recent done command.  Returns `Ok(false)` when there is nothing to undo.  If
    /// the command fails, the cursor stays where it was.
    pub fn undo(&mut self) -> Result<bool, CommandError> {
        if self.next_history_index == 0 {
            return Ok(false);
        }
        let command = &mut self.history[self.next_history_index - 1];
        if command.undo()? == Outcome::Applied {
            debug!("Undid {}", command.label());
        }
        self.next_history_index -= 1;
        Ok(true)
    }

    /// Applies the most recently undone command again.  Returns `Ok(false)` when there is nothing
    /// to redo.  If the command fails, the cursor stays where it was.
    pub fn redo(&mut self) -> Result<bool, CommandError> {
        if self.next_history_index >= self.history.len() {
            return Ok(false);
        }
        let command = &mut self.history[self.next_history_index];
        if command.redo()? == Outcome::Applied {
            debug!("Redid {}", command.label());
        }
        self.next_history_index += 1;
        Ok(true)
    }

    /// The recorded command at `index`, as its concrete type.
    pub fn get_command<T: UndoableCommand + 'static>(&self, index: usize) -> Option<&T> {
        self.history
            .get(index)
            .and_then(|command| (**command).as_any_ref().downcast_ref())
    }

    pub fn get_command_mut<T: UndoableCommand + 'static>(&mut self, index: usize) -> Option<&mut T> {
        self.history
            .get_mut(index)
            .and_then(|command| (**command).as_any_mut().downcast_mut())
    }

    /// Drops the whole history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.next_history_index = 0;
    }
}

// End of File
