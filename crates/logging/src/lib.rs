// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # ufe-usd's Logging Framework
//!
//! This crate initializes the logging framework for the ufe-usd plugin.  Every crate of the
//! workspace logs through the [`log`] facade; on desktop platforms [`env_logger`] reads the logging
//! configuration from the environment.  A host embedding the plugin creates a [`LoggingPlugin`]
//! listing the crates it wants to hear from and calls [`LoggingPlugin::init`] once at load time.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=ufe_usd=debug,ufe_usd_stage=trace my-host
//! ```

mod platform;
mod platform_impl;
pub use platform::{default_level, LoggingPlugin};

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::LoggingPlugin;
}

// End of File
