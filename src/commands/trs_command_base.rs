// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use stage::{Notification, Observer, Prim, SdfPath, StageError, SubscriptionId};

use super::{Outcome, TrsVector, UndoableCommand};
use crate::{CommandError, UsdSceneItem};

/// The per-operation hooks of a transform command.  One implementation each for translate,
/// rotate and scale; the lifecycle itself lives in [`TrsUndoableCommandBase`].
pub trait TrsCapability<V: TrsVector>: 'static {
    /// Name of the attribute the command edits, e.g. `xformOp:translate`.
    fn attribute_name(&self) -> &str;

    /// Value of a freshly created attribute: zero for translate and rotate, one for scale.
    fn default_value(&self) -> V;

    /// Short verb for edit menus and log messages.
    fn verb(&self) -> &'static str;

    /// Writes `value` into the prim's authored state.
    fn apply_value(&self, prim: &Prim<'_>, value: V) -> Result<(), StageError> {
        prim.set(self.attribute_name(), value)
    }

    /// Materializes the attribute with [`default_value`](Self::default_value) if it is absent.
    fn create_attribute_if_missing(&self, prim: &Prim<'_>) -> Result<bool, StageError> {
        prim.create_attribute(self.attribute_name(), self.default_value().into_value())
    }

    /// Whether the prim's authored state is incompatible with this edit.
    fn blocks_initialization(&self, prim: &Prim<'_>) -> Result<bool, StageError> {
        let _ = prim;
        Ok(false)
    }
}

/// Where a command is in its lifecycle.  Invalidation is tracked separately, see
/// [`TrsUndoableCommandBase::is_invalidated`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandState {
    Uninitialized,
    Initialized,
    Performed,
    Undone,
    /// Initialization was refused; the command is an inert shell.
    Blocked,
}

/// Observer half of a command.  Registered weakly with the stage between initialization and drop.
struct CommandWatch {
    item: RefCell<Rc<UsdSceneItem>>,
    attribute: String,
    writing: Cell<bool>,
    // While undone, a removed attribute is checked at redo time rather than latched.
    undone: Cell<bool>,
    invalidated: Cell<bool>,
}

impl CommandWatch {
    fn item(&self) -> Rc<UsdSceneItem> {
        Rc::clone(&self.item.borrow())
    }

    fn invalidate(&self, reason: &str) {
        if !self.invalidated.replace(true) {
            info!(
                "Disabling edit of <{}.{}>: {}",
                self.item.borrow().path(),
                self.attribute,
                reason
            );
        }
    }
}

impl Observer for CommandWatch {
    fn notify(&self, notification: &Notification) {
        if self.writing.get() || self.invalidated.get() {
            return;
        }
        let path = self.item.borrow().path().clone();
        match notification {
            Notification::PathChanged { previous, new, .. } => {
                if let Some(retargeted) = path.replace_prefix(previous, new) {
                    debug!("Following <{}> to <{}>", path, retargeted);
                    let stage = Rc::clone(self.item.borrow().stage());
                    *self.item.borrow_mut() = UsdSceneItem::create(&stage, retargeted);
                }
            }
            Notification::AttributeRemoved {
                path: changed,
                attribute,
            } if *changed == path && *attribute == self.attribute && !self.undone.get() => {
                self.invalidate("attribute removed");
            }
            Notification::PrimRemoved { path: removed } if path.has_prefix(removed) => {
                self.invalidate("prim removed");
            }
            Notification::PrimActiveChanged {
                path: deactivated,
                active: false,
            } if path.has_prefix(deactivated) => {
                self.invalidate("prim deactivated");
            }
            _ => {}
        }
    }
}

/// Marks writes made by the command itself, so that the notifications they trigger are not
/// mistaken for external edits.
struct WriteGuard {
    watch: Rc<CommandWatch>,
    previous: bool,
}

impl WriteGuard {
    fn new(watch: &Rc<CommandWatch>) -> Self {
        let previous = watch.writing.replace(true);
        Self {
            watch: Rc::clone(watch),
            previous,
        }
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        self.watch.writing.set(self.previous);
    }
}

/// Shared lifecycle of the undoable translate, rotate and scale commands.
///
/// Generic over the stored vector precision `V` and the operation `H`.  The command remembers the
/// attribute value found at [`initialize`](Self::initialize) time and the value of the latest
/// [`perform`](Self::perform), and replays them on undo and redo.  When the command had to create
/// the attribute, undo removes it again and redo recreates it.
///
/// The command only ever stores a path to its prim.  It follows renames and reparents of the prim,
/// and disables itself for good when the attribute or prim is removed, or the prim deactivated,
/// by anyone else; from then on every operation fails with [`CommandError::StaleTarget`] and
/// nothing is written.
pub struct TrsUndoableCommandBase<V: TrsVector, H: TrsCapability<V>> {
    capability: H,
    watch: Rc<CommandWatch>,
    subscription: Option<SubscriptionId>,
    previous_value: V,
    new_value: V,
    attribute_created: bool,
    executed_once: bool,
    state: CommandState,
}

impl<V: TrsVector, H: TrsCapability<V>> TrsUndoableCommandBase<V, H> {
    /// Creates a command editing `item` with the given pending value.  Fails with
    /// [`CommandError::PrecisionMismatch`] if the attribute already exists with a storage type
    /// other than `V`'s.
    pub fn new(
        item: Rc<UsdSceneItem>,
        capability: H,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, CommandError> {
        if let Ok(prim) = item.prim() {
            if let Some(attribute) = prim.attribute(capability.attribute_name())? {
                if attribute.value_type() != V::VALUE_TYPE {
                    return Err(CommandError::PrecisionMismatch {
                        path: item.path().clone(),
                        attribute: capability.attribute_name().to_owned(),
                        expected: attribute.value_type(),
                        found: V::VALUE_TYPE,
                    });
                }
            }
        }
        let default = capability.default_value();
        let watch = Rc::new(CommandWatch {
            item: RefCell::new(item),
            attribute: capability.attribute_name().to_owned(),
            writing: Cell::new(false),
            undone: Cell::new(false),
            invalidated: Cell::new(false),
        });
        Ok(Self {
            capability,
            watch,
            subscription: None,
            previous_value: default,
            new_value: V::from_components(x, y, z),
            attribute_created: false,
            executed_once: false,
            state: CommandState::Uninitialized,
        })
    }

    /// The current scene item.  This changes when the prim is renamed or reparented.
    pub fn item(&self) -> Rc<UsdSceneItem> {
        self.watch.item()
    }

    pub fn attribute_name(&self) -> &str {
        self.capability.attribute_name()
    }

    pub fn capability(&self) -> &H {
        &self.capability
    }

    pub fn previous_value(&self) -> V {
        self.previous_value
    }

    pub fn new_value(&self) -> V {
        self.new_value
    }

    pub fn attribute_created(&self) -> bool {
        self.attribute_created
    }

    pub fn executed_once(&self) -> bool {
        self.executed_once
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Whether an external edit disabled the command.
    pub fn is_invalidated(&self) -> bool {
        self.watch.invalidated.get()
    }

    /// Captures the current attribute value, creating the attribute first if it is missing, and
    /// starts watching the prim.  Reports [`Outcome::Blocked`] without touching the scene when the
    /// prim's authored state does not allow this edit.
    pub fn initialize(&mut self) -> Result<Outcome, CommandError> {
        if self.state != CommandState::Uninitialized {
            return Err(CommandError::InvalidSequencing("command initialized twice"));
        }
        let item = self.item();
        let prim = item.prim().map_err(|err| self.stale_or(err))?;

        if self.capability.blocks_initialization(&prim)? {
            info!(
                "{} of <{}> blocked by the authored state of the prim",
                self.capability.verb(),
                item.path()
            );
            self.state = CommandState::Blocked;
            return Ok(Outcome::Blocked);
        }

        if !prim.has_attribute(self.attribute_name())? {
            let _guard = WriteGuard::new(&self.watch);
            self.capability.create_attribute_if_missing(&prim)?;
            self.attribute_created = true;
        }
        self.previous_value = prim
            .get::<V>(self.capability.attribute_name())
            .map_err(|err| self.stale_or(err))?
            .unwrap_or_else(|| self.capability.default_value());

        let observer: Weak<dyn Observer> = Rc::downgrade(&self.watch) as Weak<dyn Observer>;
        self.subscription = Some(item.stage().subscribe(item.path().clone(), observer));
        self.state = CommandState::Initialized;
        debug!(
            "Initialized {} of <{}.{}> from {:?} (created: {})",
            self.capability.verb(),
            item.path(),
            self.attribute_name(),
            self.previous_value.components(),
            self.attribute_created
        );
        Ok(Outcome::Applied)
    }

    /// Sets the new value and applies it to the prim.  Called once per interactive update; each
    /// call replaces the previous new value.
    pub fn perform(&mut self, x: f64, y: f64, z: f64) -> Result<Outcome, CommandError> {
        match self.state {
            CommandState::Blocked => return Ok(Outcome::Blocked),
            CommandState::Uninitialized => {
                return Err(CommandError::InvalidSequencing("perform called before initialize"))
            }
            _ => {}
        }
        self.check_valid()?;
        let value = V::from_components(x, y, z);
        self.write(value)?;
        self.new_value = value;
        self.executed_once = true;
        self.state = CommandState::Performed;
        self.watch.undone.set(false);
        Ok(Outcome::Applied)
    }

    /// Restores the value captured at initialization, or removes the attribute if the command
    /// created it.  Only valid while the command is performed.
    pub fn undo_imp(&mut self) -> Result<Outcome, CommandError> {
        if self.state == CommandState::Blocked {
            return Ok(Outcome::Blocked);
        }
        if !self.executed_once {
            return Err(CommandError::InvalidSequencing("undo called before perform"));
        }
        self.check_valid()?;
        if self.state != CommandState::Performed {
            return Err(CommandError::InvalidSequencing("undo called twice"));
        }
        if self.attribute_created {
            let item = self.item();
            let prim = item.prim().map_err(|err| self.stale_or(err))?;
            let _guard = WriteGuard::new(&self.watch);
            prim.remove_attribute(self.attribute_name())?;
        } else {
            self.write(self.previous_value)?;
        }
        self.state = CommandState::Undone;
        self.watch.undone.set(true);
        Ok(Outcome::Applied)
    }

    /// Applies the latest new value again, recreating the attribute first if the command created
    /// it.  Only valid after [`undo_imp`](Self::undo_imp).
    ///
    /// When the command created the attribute but finds one of that name already in place, someone
    /// else authored it in the meantime; the redo is refused with [`CommandError::StaleTarget`]
    /// and their attribute is left alone.
    pub fn redo_imp(&mut self) -> Result<Outcome, CommandError> {
        if self.state == CommandState::Blocked {
            return Ok(Outcome::Blocked);
        }
        if !self.executed_once {
            return Err(CommandError::InvalidSequencing("redo called before perform"));
        }
        self.check_valid()?;
        if self.state != CommandState::Undone {
            return Err(CommandError::InvalidSequencing("redo called without undo"));
        }
        if self.attribute_created {
            let item = self.item();
            let prim = item.prim().map_err(|err| self.stale_or(err))?;
            let _guard = WriteGuard::new(&self.watch);
            let created = self
                .capability
                .create_attribute_if_missing(&prim)
                .map_err(|err| self.stale_or(err))?;
            if !created {
                warn!(
                    "Refusing to redo <{}.{}>: the attribute was authored by someone else",
                    item.path(),
                    self.attribute_name()
                );
                return Err(self.stale());
            }
        }
        self.write(self.new_value)?;
        self.state = CommandState::Performed;
        self.watch.undone.set(false);
        Ok(Outcome::Applied)
    }

    fn write(&self, value: V) -> Result<(), CommandError> {
        let item = self.item();
        let prim = item.prim().map_err(|err| self.stale_or(err))?;
        if !prim.has_attribute(self.attribute_name())? {
            warn!(
                "Refusing to write <{}.{}>: the attribute is gone",
                item.path(),
                self.attribute_name()
            );
            return Err(self.stale());
        }
        let _guard = WriteGuard::new(&self.watch);
        self.capability
            .apply_value(&prim, value)
            .map_err(|err| self.stale_or(err))
    }

    fn check_valid(&self) -> Result<(), CommandError> {
        if self.is_invalidated() {
            warn!(
                "Refusing to edit <{}.{}>: the command was invalidated",
                self.item().path(),
                self.attribute_name()
            );
            return Err(self.stale());
        }
        Ok(())
    }

    fn stale(&self) -> CommandError {
        CommandError::StaleTarget {
            path: self.item().path().clone(),
            attribute: self.attribute_name().to_owned(),
        }
    }

    /// Maps stage failures caused by the target having vanished, or having the wrong type, onto
    /// the command's own error kinds.
    fn stale_or(&self, err: StageError) -> CommandError {
        match err {
            StageError::PrimNotFound(_) | StageError::AttributeNotFound { .. } => self.stale(),
            StageError::TypeMismatch {
                path,
                attribute,
                expected,
                found,
            } => CommandError::PrecisionMismatch {
                path,
                attribute,
                expected,
                found,
            },
            other => CommandError::Stage(other),
        }
    }
}

impl<V: TrsVector, H: TrsCapability<V>> UndoableCommand for TrsUndoableCommandBase<V, H> {
    fn undo(&mut self) -> Result<Outcome, CommandError> {
        self.undo_imp()
    }

    fn redo(&mut self) -> Result<Outcome, CommandError> {
        self.redo_imp()
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.capability.verb(), self.item().path())
    }

    fn target(&self) -> (SdfPath, String) {
        (self.item().path().clone(), self.attribute_name().to_owned())
    }

    fn is_blocked(&self) -> bool {
        self.state == CommandState::Blocked
    }
}

impl<V: TrsVector, H: TrsCapability<V>> Drop for TrsUndoableCommandBase<V, H> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.item().stage().unsubscribe(id);
        }
    }
}

// End of File
