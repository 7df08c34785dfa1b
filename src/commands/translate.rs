// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::rc::Rc;

use glam::DVec3;

use super::{TrsCapability, TrsUndoableCommandBase, TrsVector};
use crate::{CommandError, UsdSceneItem};

/// Edits `xformOp:translate`, defaulting to the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Translate;

impl Translate {
    pub const ATTRIBUTE_NAME: &'static str = "xformOp:translate";
}

impl<V: TrsVector> TrsCapability<V> for Translate {
    fn attribute_name(&self) -> &str {
        Self::ATTRIBUTE_NAME
    }

    fn default_value(&self) -> V {
        V::from_components(0.0, 0.0, 0.0)
    }

    fn verb(&self) -> &'static str {
        "Translate"
    }
}

/// Translate command over a double precision attribute.
pub type UsdTranslateUndoableCommand = TrsUndoableCommandBase<DVec3, Translate>;

impl<V: TrsVector> TrsUndoableCommandBase<V, Translate> {
    pub fn create(item: Rc<UsdSceneItem>, x: f64, y: f64, z: f64) -> Result<Self, CommandError> {
        Self::new(item, Translate, x, y, z)
    }
}

// End of File
