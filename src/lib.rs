// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # ufe-usd
//!
//! Undoable transform edits on scene description prims, as driven by an interactive host: a
//! manipulator creates a translate, rotate or scale command when a drag starts, performs it on every
//! update, and records it on the [`UndoStack`] when the drag ends.  Commands store only the path of
//! their prim, follow it through renames and reparents, and refuse to touch the scene once someone
//! else has removed what they edit.
//!
//! The outliner side of the plugin lives in [`UsdUiInfoHandler`].

mod commands;
mod error;
mod preferences;
mod scene_item;
mod ui_info;
mod undo_stack;
mod util;

pub use commands::{
    CommandState, Outcome, Rotate, RotationOrder, Scale, Translate, TrsCapability,
    TrsUndoableCommandBase, TrsVector, UndoableCommand, UsdRotateUndoableCommand,
    UsdScaleUndoableCommand, UsdTranslateUndoableCommand,
};
pub use error::CommandError;
pub use preferences::{
    load_preferences, load_preferences_from, preferences_path, save_preferences,
    save_preferences_to, Preferences, PreferencesError,
};
pub use scene_item::UsdSceneItem;
pub use ui_info::{CellInfo, ColorPreferences, Icon, IconPosition, UsdUiInfoHandler};
pub use undo_stack::UndoStack;

pub use stage;

use logging::LoggingPlugin;

/// Crates of this plugin whose log records a host may want to capture.
pub const LOG_CRATES: [&str; 2] = [env!("CARGO_PKG_NAME"), "ufe-usd-stage"];

/// A [`LoggingPlugin`] for this plugin's crates at the default level.  The host calls
/// [`init`](LoggingPlugin::init) on it once when loading the plugin.
pub fn logging_plugin() -> LoggingPlugin {
    LoggingPlugin::new(LOG_CRATES.to_vec())
}

/// Most commonly used types, suitable for glob import.
pub mod prelude {
    pub use crate::{
        CommandError, Outcome, RotationOrder, UndoStack, UndoableCommand, UsdRotateUndoableCommand,
        UsdScaleUndoableCommand, UsdSceneItem, UsdTranslateUndoableCommand,
    };
    pub use stage::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_covers_every_crate() {
        let plugin = logging_plugin().with_level(log::LevelFilter::Debug);
        assert_eq!(plugin.filter_string(), "ufe_usd=debug,ufe_usd_stage=debug");
    }
}

// End of File
