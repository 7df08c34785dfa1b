// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use stage::{SdfPath, StageError, ValueType};
use thiserror::Error;

/// Failures reported by undoable commands and the [`UndoStack`](crate::UndoStack).
///
/// A command that refuses to start because of the prim's authored state is not an error: it
/// reports [`Outcome::Blocked`](crate::Outcome::Blocked) and stays inert.  Only the undo stack
/// turns that into [`CommandError::InitializationBlocked`], when asked to record such a command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Command on <{path}.{attribute}> is blocked by the prim's authored state")]
    InitializationBlocked { path: SdfPath, attribute: String },

    #[error("Target <{path}.{attribute}> is stale: it was removed or invalidated externally")]
    StaleTarget { path: SdfPath, attribute: String },

    #[error("Precision mismatch for <{path}.{attribute}>: attribute is '{expected}', command writes '{found}'")]
    PrecisionMismatch {
        path: SdfPath,
        attribute: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("Invalid command sequencing: {0}")]
    InvalidSequencing(&'static str),

    #[error("Stage error: {0}")]
    Stage(#[from] StageError),
}

// End of File
