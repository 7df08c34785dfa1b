// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use thiserror::Error;

use crate::{SdfPath, ValueType};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("Invalid prim path: {0}")]
    InvalidPath(String),

    #[error("No prim at path <{0}>")]
    PrimNotFound(SdfPath),

    #[error("A prim already exists at path <{0}>")]
    PrimExists(SdfPath),

    #[error("The pseudo-root cannot be edited")]
    PseudoRoot,

    #[error("Cannot move <{path}> under its own descendant <{new_parent}>")]
    InvalidReparent { path: SdfPath, new_parent: SdfPath },

    #[error("No attribute <{path}.{attribute}>")]
    AttributeNotFound { path: SdfPath, attribute: String },

    #[error("Type mismatch for <{path}.{attribute}>: expected '{expected}', got '{found}'")]
    TypeMismatch {
        path: SdfPath,
        attribute: String,
        expected: ValueType,
        found: ValueType,
    },
}

// End of File
