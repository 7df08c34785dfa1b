// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::rc::Rc;

use stage::{Prim, SdfPath, Stage, StageError};

/// A reference to a prim, as handed out to the host's outliner, selection and edit commands.
///
/// An item never caches the prim itself, only the stage and the path, and resolves the prim on
/// every [`prim`](Self::prim) call.  The prim may have moved or vanished since the item was
/// created (undo or redo of other commands can reparent or delete it); code that must follow such
/// moves replaces its item rather than mutating it.
#[derive(Debug)]
pub struct UsdSceneItem {
    stage: Rc<Stage>,
    path: SdfPath,
}

impl UsdSceneItem {
    pub fn create(stage: &Rc<Stage>, path: SdfPath) -> Rc<Self> {
        Rc::new(Self {
            stage: Rc::clone(stage),
            path,
        })
    }

    pub fn stage(&self) -> &Rc<Stage> {
        &self.stage
    }

    pub fn path(&self) -> &SdfPath {
        &self.path
    }

    /// Resolves the prim behind this item.
    pub fn prim(&self) -> Result<Prim<'_>, StageError> {
        self.stage.prim(&self.path)
    }

    /// The prim's type name, or the empty string if the prim no longer exists.
    pub fn node_type(&self) -> String {
        self.stage.type_name(&self.path).unwrap_or_default()
    }
}

// End of File
