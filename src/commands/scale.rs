// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::rc::Rc;

use glam::DVec3;

use super::{TrsCapability, TrsUndoableCommandBase, TrsVector};
use crate::{CommandError, UsdSceneItem};

/// Edits `xformOp:scale`.  A new attribute starts at identity, (1, 1, 1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scale;

impl Scale {
    pub const ATTRIBUTE_NAME: &'static str = "xformOp:scale";
}

impl<V: TrsVector> TrsCapability<V> for Scale {
    fn attribute_name(&self) -> &str {
        Self::ATTRIBUTE_NAME
    }

    fn default_value(&self) -> V {
        V::from_components(1.0, 1.0, 1.0)
    }

    fn verb(&self) -> &'static str {
        "Scale"
    }
}

/// Scale command over a double precision attribute.
pub type UsdScaleUndoableCommand = TrsUndoableCommandBase<DVec3, Scale>;

impl<V: TrsVector> TrsUndoableCommandBase<V, Scale> {
    pub fn create(item: Rc<UsdSceneItem>, x: f64, y: f64, z: f64) -> Result<Self, CommandError> {
        Self::new(item, Scale, x, y, z)
    }
}

// End of File
