// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! User preferences and their persistence.
//!
//! Preferences are stored as pretty-printed JSON in `<config_dir>/ufe-usd/preferences.json`:
//!
//! - **Windows:** `%APPDATA%\ufe-usd\preferences.json`
//! - **macOS:** `~/Library/Application Support/ufe-usd/preferences.json`
//! - **Linux:** `~/.config/ufe-usd/preferences.json`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::RotationOrder;
use crate::ui_info::ColorPreferences;

const CONFIG_DIR_NAME: &str = "ufe-usd";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Could not determine the config directory")]
    NoConfigDir,

    #[error("Failed to write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent user preferences.
///
/// Unknown fields are ignored and missing fields take their defaults, so files written by older or
/// newer versions still load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display colors by name, as RGB components in `0.0..=1.0`.  Consulted by the outliner, e.g.
    /// `outlinerInvisibleColor` for inactive prims.
    pub display_colors: BTreeMap<String, [f64; 3]>,

    /// Rotation order used when the host starts a rotate on a prim without a rotate op.
    pub default_rotation_order: RotationOrder,
}

impl Preferences {
    pub fn set_display_color(&mut self, name: impl Into<String>, rgb: [f64; 3]) {
        self.display_colors.insert(name.into(), rgb);
    }
}

impl ColorPreferences for Preferences {
    fn color(&self, name: &str) -> Option<[f64; 3]> {
        self.display_colors.get(name).copied()
    }
}

/// Returns the path to the preferences file, or `None` if the config directory cannot be
/// determined.
pub fn preferences_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join(CONFIG_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

/// Loads preferences from the user's config directory.  Never fails: defaults are returned when
/// the directory is unknown or the file is missing or unreadable.
pub fn load_preferences() -> Preferences {
    match preferences_path() {
        Some(path) => load_preferences_from(&path),
        None => {
            warn!("Could not determine config directory, using default preferences");
            Preferences::default()
        }
    }
}

/// Loads preferences from `path`, falling back to defaults like [`load_preferences`].
pub fn load_preferences_from(path: &Path) -> Preferences {
    if !path.exists() {
        // First run.
        return Preferences::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Preferences::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            Preferences::default()
        }
    }
}

/// Saves preferences to the user's config directory.
pub fn save_preferences(prefs: &Preferences) -> Result<(), PreferencesError> {
    let path = preferences_path().ok_or(PreferencesError::NoConfigDir)?;
    save_preferences_to(prefs, &path)
}

/// Saves preferences to `path`, creating its parent directory if needed.
pub fn save_preferences_to(prefs: &Preferences, path: &Path) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}

// End of File
