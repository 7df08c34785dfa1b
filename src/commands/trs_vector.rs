// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt::Debug;

use glam::{DVec3, Vec3};
use stage::AttributeValue;

/// A three component vector stored in a transform attribute.  Implemented for single precision
/// ([`Vec3`], stored as `float3`) and double precision ([`DVec3`], stored as `double3`); a command
/// must use the precision the attribute was declared with.
pub trait TrsVector: AttributeValue + Copy + PartialEq + Debug + 'static {
    fn from_components(x: f64, y: f64, z: f64) -> Self;
    fn components(self) -> [f64; 3];
}

impl TrsVector for Vec3 {
    fn from_components(x: f64, y: f64, z: f64) -> Self {
        Vec3::new(x as f32, y as f32, z as f32)
    }

    fn components(self) -> [f64; 3] {
        self.as_dvec3().to_array()
    }
}

impl TrsVector for DVec3 {
    fn from_components(x: f64, y: f64, z: f64) -> Self {
        DVec3::new(x, y, z)
    }

    fn components(self) -> [f64; 3] {
        self.to_array()
    }
}


// End of File
