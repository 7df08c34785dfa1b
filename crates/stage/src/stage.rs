// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::prim::PrimData;
use crate::{
    Attribute, AttributeValue, CompositionArc, Notification, Observer, PathChangeKind, Prim,
    SdfPath, StageError, Value,
};

/// Identifies a registered observer, for [`Stage::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    scope: SdfPath,
    observer: Weak<dyn Observer>,
}

/// An in-memory scene description: a tree of prims addressed by [`SdfPath`], each carrying typed
/// attributes, an active flag, and composition-arc metadata.
///
/// The stage is shared (`Rc<Stage>`) between everything that edits or watches the scene and is
/// mutated through `&self`.  Every edit is applied first and then reported to the observers whose
/// scope it concerns, with no internal borrow held during dispatch; observers are therefore free to
/// read or edit the stage from inside [`Observer::notify`].
///
/// All access happens on the thread that owns the stage.
pub struct Stage {
    prims: RefCell<BTreeMap<SdfPath, PrimData>>,
    subscriptions: RefCell<Vec<Subscription>>,
    next_subscription: Cell<u64>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("prims", &self.prims.borrow().len())
            .field("subscriptions", &self.subscriptions.borrow().len())
            .finish()
    }
}

impl Stage {
    /// Creates an empty stage holding only the pseudo-root.
    pub fn new() -> Rc<Self> {
        let mut prims = BTreeMap::new();
        prims.insert(SdfPath::absolute_root(), PrimData::new(""));
        Rc::new(Self {
            prims: RefCell::new(prims),
            subscriptions: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        })
    }

    // -------------------------------------------------------------------------------------------
    // --- Prims                                                                                ---
    // -------------------------------------------------------------------------------------------

    /// Resolves `path` to a live prim handle.
    pub fn prim(&self, path: &SdfPath) -> Result<Prim<'_>, StageError> {
        if path.is_absolute_root() {
            return Err(StageError::PseudoRoot);
        }
        if !self.has_prim(path) {
            return Err(StageError::PrimNotFound(path.clone()));
        }
        Ok(Prim::new(self, path.clone()))
    }

    pub fn has_prim(&self, path: &SdfPath) -> bool {
        self.prims.borrow().contains_key(path)
    }

    /// Defines a new prim of the given type.  The parent must already exist.
    pub fn define_prim(&self, path: &SdfPath, type_name: &str) -> Result<(), StageError> {
        {
            let mut prims = self.prims.borrow_mut();
            let parent = path.parent().ok_or(StageError::PseudoRoot)?;
            if !prims.contains_key(&parent) {
                return Err(StageError::PrimNotFound(parent));
            }
            if prims.contains_key(path) {
                return Err(StageError::PrimExists(path.clone()));
            }
            prims.insert(path.clone(), PrimData::new(type_name));
        }
        debug!("Defined {} prim <{}>", type_name, path);
        self.notify(Notification::PrimAdded { path: path.clone() });
        Ok(())
    }

    /// Removes the prim and its whole subtree.
    pub fn remove_prim(&self, path: &SdfPath) -> Result<(), StageError> {
        self.edit_prim(path, |_| ())?;
        self.prims
            .borrow_mut()
            .retain(|candidate, _| !candidate.has_prefix(path));
        debug!("Removed prim <{}>", path);
        self.notify(Notification::PrimRemoved { path: path.clone() });
        Ok(())
    }

    /// Renames the prim in place, returning its new path.
    pub fn rename_prim(&self, path: &SdfPath, new_name: &str) -> Result<SdfPath, StageError> {
        let parent = path.parent().ok_or(StageError::PseudoRoot)?;
        let new_path = parent.append_child(new_name)?;
        self.move_prim(path, new_path, PathChangeKind::Rename)
    }

    /// Moves the prim under `new_parent`, keeping its name, and returns its new path.
    pub fn reparent_prim(
        &self,
        path: &SdfPath,
        new_parent: &SdfPath,
    ) -> Result<SdfPath, StageError> {
        if new_parent.has_prefix(path) {
            return Err(StageError::InvalidReparent {
                path: path.clone(),
                new_parent: new_parent.clone(),
            });
        }
        if !self.has_prim(new_parent) {
            return Err(StageError::PrimNotFound(new_parent.clone()));
        }
        let new_path = new_parent.append_child(path.name())?;
        self.move_prim(path, new_path, PathChangeKind::Reparent)
    }

    fn move_prim(
        &self,
        path: &SdfPath,
        new_path: SdfPath,
        kind: PathChangeKind,
    ) -> Result<SdfPath, StageError> {
        self.edit_prim(path, |_| ())?;
        if new_path == *path {
            return Ok(new_path);
        }
        {
            let mut prims = self.prims.borrow_mut();
            if prims.contains_key(&new_path) {
                return Err(StageError::PrimExists(new_path));
            }
            let moved: Vec<SdfPath> = prims
                .keys()
                .filter(|candidate| candidate.has_prefix(path))
                .cloned()
                .collect();
            for old in moved {
                if let (Some(data), Some(new)) =
                    (prims.remove(&old), old.replace_prefix(path, &new_path))
                {
                    prims.insert(new, data);
                }
            }
        }
        // Observer scopes follow the prims they watch.
        for subscription in self.subscriptions.borrow_mut().iter_mut() {
            if let Some(scope) = subscription.scope.replace_prefix(path, &new_path) {
                subscription.scope = scope;
            }
        }
        debug!("Moved prim <{}> to <{}>", path, new_path);
        self.notify(Notification::PathChanged {
            previous: path.clone(),
            new: new_path.clone(),
            kind,
        });
        Ok(new_path)
    }

    pub fn set_active(&self, path: &SdfPath, active: bool) -> Result<(), StageError> {
        let changed = self.edit_prim(path, |data| {
            let changed = data.active != active;
            data.active = active;
            changed
        })?;
        if changed {
            self.notify(Notification::PrimActiveChanged {
                path: path.clone(),
                active,
            });
        }
        Ok(())
    }

    pub fn is_active(&self, path: &SdfPath) -> Result<bool, StageError> {
        self.read_prim(path, |data| data.active)
    }

    pub fn type_name(&self, path: &SdfPath) -> Result<String, StageError> {
        self.read_prim(path, |data| data.type_name.clone())
    }

    /// Direct children of `path`, in path order.
    pub fn children(&self, path: &SdfPath) -> Result<Vec<SdfPath>, StageError> {
        let prims = self.prims.borrow();
        if !prims.contains_key(path) {
            return Err(StageError::PrimNotFound(path.clone()));
        }
        Ok(prims
            .keys()
            .filter(|candidate| candidate.parent().as_ref() == Some(path))
            .cloned()
            .collect())
    }

    pub fn add_composition_arc(
        &self,
        path: &SdfPath,
        arc: CompositionArc,
    ) -> Result<(), StageError> {
        self.edit_prim(path, |data| data.arcs.push(arc))
    }

    pub fn composition_arcs(&self, path: &SdfPath) -> Result<Vec<CompositionArc>, StageError> {
        self.read_prim(path, |data| data.arcs.clone())
    }

    // -------------------------------------------------------------------------------------------
    // --- Attributes                                                                           ---
    // -------------------------------------------------------------------------------------------

    pub fn has_attribute(&self, path: &SdfPath, name: &str) -> Result<bool, StageError> {
        self.read_prim(path, |data| data.attributes.contains_key(name))
    }

    pub fn attribute(&self, path: &SdfPath, name: &str) -> Result<Option<Attribute>, StageError> {
        self.read_prim(path, |data| data.attributes.get(name).cloned())
    }

    pub fn attribute_names(&self, path: &SdfPath) -> Result<Vec<String>, StageError> {
        self.read_prim(path, |data| data.attributes.keys().cloned().collect())
    }

    /// Reads an attribute as `T`.  `Ok(None)` if the attribute does not exist; an error if it
    /// exists with another declared type.
    pub fn get<T: AttributeValue>(&self, path: &SdfPath, name: &str) -> Result<Option<T>, StageError> {
        let Some(attribute) = self.attribute(path, name)? else {
            return Ok(None);
        };
        match attribute.get::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(StageError::TypeMismatch {
                path: path.clone(),
                attribute: name.to_owned(),
                expected: attribute.value_type(),
                found: T::VALUE_TYPE,
            }),
        }
    }

    /// Writes an existing attribute.  The value must match the attribute's declared type.
    pub fn set<T: AttributeValue>(&self, path: &SdfPath, name: &str, value: T) -> Result<(), StageError> {
        self.set_value(path, name, value.into_value())
    }

    pub fn set_value(&self, path: &SdfPath, name: &str, value: Value) -> Result<(), StageError> {
        self.edit_prim(path, |data| match data.attributes.get_mut(name) {
            None => Err(StageError::AttributeNotFound {
                path: path.clone(),
                attribute: name.to_owned(),
            }),
            Some(attribute) => attribute.set(value).map_err(|found| StageError::TypeMismatch {
                path: path.clone(),
                attribute: name.to_owned(),
                expected: attribute.value_type(),
                found,
            }),
        })??;
        trace!("Set <{}.{}>", path, name);
        self.notify(Notification::AttributeChanged {
            path: path.clone(),
            attribute: name.to_owned(),
        });
        Ok(())
    }

    /// Creates the attribute with `default` as its value and declared type.  Returns `false`
    /// without touching anything if an attribute of that type already exists.
    pub fn create_attribute(
        &self,
        path: &SdfPath,
        name: &str,
        default: Value,
    ) -> Result<bool, StageError> {
        let created = self.edit_prim(path, |data| match data.attributes.get(name) {
            Some(existing) if existing.value_type() == default.value_type() => Ok(false),
            Some(existing) => Err(StageError::TypeMismatch {
                path: path.clone(),
                attribute: name.to_owned(),
                expected: existing.value_type(),
                found: default.value_type(),
            }),
            None => {
                data.attributes.insert(name.to_owned(), Attribute::new(default));
                Ok(true)
            }
        })??;
        if created {
            debug!("Created attribute <{}.{}>", path, name);
            self.notify(Notification::AttributeAdded {
                path: path.clone(),
                attribute: name.to_owned(),
            });
        }
        Ok(created)
    }

    /// Removes the attribute.  Returns `false` if there was nothing to remove.
    pub fn remove_attribute(&self, path: &SdfPath, name: &str) -> Result<bool, StageError> {
        let removed = self.edit_prim(path, |data| data.attributes.remove(name).is_some())?;
        if removed {
            debug!("Removed attribute <{}.{}>", path, name);
            self.notify(Notification::AttributeRemoved {
                path: path.clone(),
                attribute: name.to_owned(),
            });
        }
        Ok(removed)
    }

    // -------------------------------------------------------------------------------------------
    // --- Notifications                                                                        ---
    // -------------------------------------------------------------------------------------------

    /// Registers `observer` for changes concerning the subtree rooted at `scope`.  The stage only
    /// keeps a weak reference; a dropped observer is silently pruned.  The scope follows renames
    /// and reparents of the prim it names.
    pub fn subscribe(&self, scope: SdfPath, observer: Weak<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            scope,
            observer,
        });
        id
    }

    /// Returns `false` if `id` was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|subscription| subscription.id != id);
        subscriptions.len() != before
    }

    /// The number of live observers.
    pub fn observer_count(&self) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|subscription| subscription.observer.strong_count() > 0)
            .count()
    }

    fn notify(&self, notification: Notification) {
        let observers: Vec<Rc<dyn Observer>> = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            subscriptions.retain(|subscription| subscription.observer.strong_count() > 0);
            subscriptions
                .iter()
                .filter(|subscription| notification.concerns(&subscription.scope))
                .filter_map(|subscription| subscription.observer.upgrade())
                .collect()
        };
        trace!("Dispatching {:?} to {} observer(s)", notification, observers.len());
        for observer in observers {
            observer.notify(&notification);
        }
    }

    // -------------------------------------------------------------------------------------------

    fn read_prim<R>(&self, path: &SdfPath, f: impl FnOnce(&PrimData) -> R) -> Result<R, StageError> {
        let prims = self.prims.borrow();
        prims
            .get(path)
            .map(f)
            .ok_or_else(|| StageError::PrimNotFound(path.clone()))
    }

    fn edit_prim<R>(
        &self,
        path: &SdfPath,
        f: impl FnOnce(&mut PrimData) -> R,
    ) -> Result<R, StageError> {
        if path.is_absolute_root() {
            return Err(StageError::PseudoRoot);
        }
        let mut prims = self.prims.borrow_mut();
        prims
            .get_mut(path)
            .map(f)
            .ok_or_else(|| StageError::PrimNotFound(path.clone()))
    }
}

// End of File
