// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;
use std::rc::Rc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stage::{Prim, StageError};

use super::{TrsCapability, TrsUndoableCommandBase, TrsVector};
use crate::{CommandError, UsdSceneItem};

const ROTATE_PREFIX: &str = "xformOp:rotate";

/// The order in which the three Euler angles of a rotate op are applied.  The order is part of the
/// attribute name, `xformOp:rotateXYZ` being the common case.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::XYZ,
        RotationOrder::XZY,
        RotationOrder::YXZ,
        RotationOrder::YZX,
        RotationOrder::ZXY,
        RotationOrder::ZYX,
    ];

    pub fn attribute_name(self) -> &'static str {
        match self {
            RotationOrder::XYZ => "xformOp:rotateXYZ",
            RotationOrder::XZY => "xformOp:rotateXZY",
            RotationOrder::YXZ => "xformOp:rotateYXZ",
            RotationOrder::YZX => "xformOp:rotateYZX",
            RotationOrder::ZXY => "xformOp:rotateZXY",
            RotationOrder::ZYX => "xformOp:rotateZYX",
        }
    }

    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.attribute_name() == name)
    }

    /// The order of the three-axis rotate op already authored on `item`'s prim, if any.  Hosts
    /// fall back to [`Preferences::default_rotation_order`](crate::Preferences) otherwise.
    pub fn authored(item: &UsdSceneItem) -> Option<Self> {
        let names = item.stage().attribute_names(item.path()).ok()?;
        names
            .iter()
            .find_map(|name| Self::from_attribute_name(name))
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.attribute_name();
        f.write_str(&name[ROTATE_PREFIX.len()..])
    }
}

/// Edits the three-axis rotate op of the given order, with angles in degrees.
///
/// A prim carries at most one rotate op per edit: initialization is refused when any other rotate
/// op (another order, or a single-axis `xformOp:rotateX`-style op) is already authored, since
/// writing ours would silently compose with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotate {
    order: RotationOrder,
}

impl Rotate {
    pub fn new(order: RotationOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> RotationOrder {
        self.order
    }
}

impl<V: TrsVector> TrsCapability<V> for Rotate {
    fn attribute_name(&self) -> &str {
        self.order.attribute_name()
    }

    fn default_value(&self) -> V {
        V::from_components(0.0, 0.0, 0.0)
    }

    fn verb(&self) -> &'static str {
        "Rotate"
    }

    fn blocks_initialization(&self, prim: &Prim<'_>) -> Result<bool, StageError> {
        let ours = self.order.attribute_name();
        Ok(prim
            .attribute_names()?
            .iter()
            .any(|name| name.starts_with(ROTATE_PREFIX) && name != ours))
    }
}

/// Rotate command.  Rotate ops are created and written in single precision.
pub type UsdRotateUndoableCommand = TrsUndoableCommandBase<Vec3, Rotate>;

impl<V: TrsVector> TrsUndoableCommandBase<V, Rotate> {
    pub fn create(
        item: Rc<UsdSceneItem>,
        order: RotationOrder,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, CommandError> {
        Self::new(item, Rotate::new(order), x, y, z)
    }
}


// End of File
