// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::collections::BTreeMap;

use crate::{Attribute, AttributeValue, SdfPath, Stage, StageError, Value};

/// The kind of a composition arc authored on a prim.  The stage records arcs as metadata only; it
/// never composes the targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArcType {
    Root,
    Inherit,
    Variant,
    Relocate,
    Reference,
    Payload,
    Specialize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompositionArc {
    pub arc_type: ArcType,
    /// Asset path or prim path the arc points to, when there is one.
    pub target: Option<String>,
}

impl CompositionArc {
    pub fn new(arc_type: ArcType) -> Self {
        Self {
            arc_type,
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PrimData {
    pub(crate) type_name: String,
    pub(crate) active: bool,
    pub(crate) attributes: BTreeMap<String, Attribute>,
    pub(crate) arcs: Vec<CompositionArc>,
}

impl PrimData {
    pub(crate) fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_owned(),
            active: true,
            attributes: BTreeMap::new(),
            arcs: Vec::new(),
        }
    }
}

/// A live handle to a prim.  The handle borrows the stage, so it cannot be kept across calls that
/// may restructure the scene; store the [`SdfPath`] instead.  Every accessor resolves the path
/// again and fails with [`StageError::PrimNotFound`] if the prim has gone.
#[derive(Clone, Debug)]
pub struct Prim<'a> {
    stage: &'a Stage,
    path: SdfPath,
}

impl<'a> Prim<'a> {
    pub(crate) fn new(stage: &'a Stage, path: SdfPath) -> Self {
        Self { stage, path }
    }

    pub fn stage(&self) -> &'a Stage {
        self.stage
    }

    pub fn path(&self) -> &SdfPath {
        &self.path
    }

    pub fn is_valid(&self) -> bool {
        self.stage.has_prim(&self.path)
    }

    pub fn type_name(&self) -> Result<String, StageError> {
        self.stage.type_name(&self.path)
    }

    pub fn is_active(&self) -> Result<bool, StageError> {
        self.stage.is_active(&self.path)
    }

    pub fn has_attribute(&self, name: &str) -> Result<bool, StageError> {
        self.stage.has_attribute(&self.path, name)
    }

    pub fn attribute(&self, name: &str) -> Result<Option<Attribute>, StageError> {
        self.stage.attribute(&self.path, name)
    }

    pub fn attribute_names(&self) -> Result<Vec<String>, StageError> {
        self.stage.attribute_names(&self.path)
    }

    pub fn get<T: AttributeValue>(&self, name: &str) -> Result<Option<T>, StageError> {
        self.stage.get(&self.path, name)
    }

    pub fn set<T: AttributeValue>(&self, name: &str, value: T) -> Result<(), StageError> {
        self.stage.set(&self.path, name, value)
    }

    pub fn create_attribute(&self, name: &str, default: Value) -> Result<bool, StageError> {
        self.stage.create_attribute(&self.path, name, default)
    }

    pub fn remove_attribute(&self, name: &str) -> Result<bool, StageError> {
        self.stage.remove_attribute(&self.path, name)
    }

    pub fn composition_arcs(&self) -> Result<Vec<CompositionArc>, StageError> {
        self.stage.composition_arcs(&self.path)
    }
}

// End of File
