// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Undoable edit commands over prim attributes.
//!
//! The translate, rotate and scale commands share one lifecycle, implemented once by
//! [`TrsUndoableCommandBase`] against the small [`TrsCapability`] interface.  The host creates a
//! command when a manipulation gesture starts, calls [`perform`](TrsUndoableCommandBase::perform)
//! for every interactive update, and records the finished command on its undo stack.

mod rotate;
mod scale;
mod translate;
mod trs_command_base;
mod trs_vector;

pub use rotate::{Rotate, RotationOrder, UsdRotateUndoableCommand};
pub use scale::{Scale, UsdScaleUndoableCommand};
pub use translate::{Translate, UsdTranslateUndoableCommand};
pub use trs_command_base::{CommandState, TrsCapability, TrsUndoableCommandBase};
pub use trs_vector::TrsVector;

use stage::SdfPath;

use crate::util::as_any::AsAny;
use crate::CommandError;

/// What a command operation did to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The operation was carried out.
    Applied,
    /// The command refused to initialize and is an inert shell; nothing was touched.
    Blocked,
}

/// A command that can be recorded on the [`UndoStack`](crate::UndoStack).
///
/// Commands own whatever they need to reach the scene, so undo and redo take no arguments.  Both
/// must either fully apply or leave the scene untouched and report why.
pub trait UndoableCommand: AsAny {
    fn undo(&mut self) -> Result<Outcome, CommandError>;
    fn redo(&mut self) -> Result<Outcome, CommandError>;

    /// A human readable label for the host's edit menu, e.g. `Translate </World/Cube>`.
    fn label(&self) -> String;

    /// The prim and attribute the command edits.
    fn target(&self) -> (SdfPath, String);

    /// Whether the command refused to initialize.  Blocked commands are never recorded.
    fn is_blocked(&self) -> bool {
        false
    }
}

// End of File
