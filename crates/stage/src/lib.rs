// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # ufe-usd's Scene Description Runtime
//!
//! A small, single-threaded, in-memory stand-in for a hierarchical scene description: prims
//! addressed by [`SdfPath`], typed [`Attribute`]s whose declared type is fixed at creation, and a
//! synchronous [`Notification`] stream that [`Observer`]s subscribe to per subtree.
//!
//! Composition is out of scope; composition arcs are recorded on prims as plain metadata so that
//! user interface code can describe them.

mod error;
mod notification;
mod path;
mod prim;
mod stage;
mod value;

pub use error::StageError;
pub use notification::{Notification, Observer, PathChangeKind};
pub use path::SdfPath;
pub use prim::{ArcType, CompositionArc, Prim};
pub use stage::{Stage, SubscriptionId};
pub use value::{Attribute, AttributeValue, Value, ValueType};

/// Most commonly used types, suitable for glob import.
pub mod prelude {
    pub use crate::{
        Notification, Observer, Prim, SdfPath, Stage, StageError, Value, ValueType,
    };
}

// End of File
