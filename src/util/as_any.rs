// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::any::Any;

/// Lets the [`UndoStack`](crate::UndoStack) hand back a recorded `dyn UndoableCommand` as its
/// concrete type.
pub trait AsAny {
    fn as_any_ref(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// A blanket implementation, so command types never implement this by hand.  The casts cannot be
// written as default methods on the trait itself.
impl<T> AsAny for T
where
    T: Any,
{
    fn as_any_ref(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// End of File
