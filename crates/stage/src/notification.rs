// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::SdfPath;

/// How a prim came to live at a new path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathChangeKind {
    Rename,
    Reparent,
}

/// A structural or value change made to a [`Stage`](crate::Stage).  Notifications are dispatched
/// synchronously, after the change has been applied, to every observer whose scope the change
/// concerns.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    PrimAdded {
        path: SdfPath,
    },
    /// The prim and its whole subtree were removed.
    PrimRemoved {
        path: SdfPath,
    },
    PrimActiveChanged {
        path: SdfPath,
        active: bool,
    },
    /// The prim (and its subtree) moved from `previous` to `new`.
    PathChanged {
        previous: SdfPath,
        new: SdfPath,
        kind: PathChangeKind,
    },
    AttributeAdded {
        path: SdfPath,
        attribute: String,
    },
    AttributeChanged {
        path: SdfPath,
        attribute: String,
    },
    AttributeRemoved {
        path: SdfPath,
        attribute: String,
    },
}

impl Notification {
    /// The prim the change was made to.  For path changes, this is the new path.
    pub fn path(&self) -> &SdfPath {
        match self {
            Notification::PrimAdded { path }
            | Notification::PrimRemoved { path }
            | Notification::PrimActiveChanged { path, .. }
            | Notification::AttributeAdded { path, .. }
            | Notification::AttributeChanged { path, .. }
            | Notification::AttributeRemoved { path, .. } => path,
            Notification::PathChanged { new, .. } => new,
        }
    }

    /// Structural changes affect every prim below the changed one, not just the prim itself.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Notification::PrimRemoved { .. }
                | Notification::PrimActiveChanged { .. }
                | Notification::PathChanged { .. }
        )
    }

    /// Whether an observer scoped to the subtree rooted at `scope` should hear about this change:
    /// either the change happened inside the subtree, or a structural change happened to the
    /// scope prim or one of its ancestors.
    pub fn concerns(&self, scope: &SdfPath) -> bool {
        let touches = |path: &SdfPath| {
            path.has_prefix(scope) || (self.is_structural() && scope.has_prefix(path))
        };
        match self {
            Notification::PathChanged { previous, new, .. } => touches(previous) || touches(new),
            _ => touches(self.path()),
        }
    }
}

/// Receives stage notifications.  Observers are held weakly by the stage and called through a
/// shared reference, so implementations keep their mutable state in cells.  An observer may call
/// back into the stage from [`Observer::notify`], including making further edits.
pub trait Observer {
    fn notify(&self, notification: &Notification);
}


// End of File
