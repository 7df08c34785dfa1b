// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

/// Initializes the logging framework to capture logs from the crates specified with a minimum
/// [`log::Level`] of [`Info`](log::Level::Info) on debug builds and [`Warn`](log::Level::Warn) on
/// release builds.  On desktop platforms, these defaults can be overridden by setting the
/// `RUST_LOG` environment variable.
#[derive(Debug, Clone)]
pub struct LoggingPlugin {
    crates: Vec<&'static str>,
    level: log::LevelFilter,
}

/// The minimum level used when the host does not pick one: [`Info`](log::Level::Info) in debug
/// builds, [`Warn`](log::Level::Warn) in release builds.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Method for creating a [`LoggingPlugin`] instance, specifying the crates to capture logs from.
impl LoggingPlugin {
    /// Creates a new [`LoggingPlugin`] instance with the specified list of crates to capture logs
    /// from, at the [`default_level`].
    pub fn new(crates: Vec<&'static str>) -> Self {
        Self {
            crates,
            level: default_level(),
        }
    }

    /// Overrides the minimum level applied to the listed crates when `RUST_LOG` is not set.
    pub fn with_level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// The crates whose log records are captured.
    pub fn crates(&self) -> &[&'static str] {
        &self.crates
    }

    /// The `RUST_LOG`-style filter string built from the crate list and level, e.g.
    /// `ufe_usd=info,ufe_usd_stage=info`.  Crate names are normalized to their module path form.
    pub fn filter_string(&self) -> String {
        let level_str = match self.level {
            log::LevelFilter::Off => "off",
            log::LevelFilter::Error => "error",
            log::LevelFilter::Warn => "warn",
            log::LevelFilter::Info => "info",
            log::LevelFilter::Debug => "debug",
            log::LevelFilter::Trace => "trace",
        };
        self.crates
            .iter()
            .map(|&pkg_name| format!("{}={}", pkg_name.replace('-', "_"), level_str))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Installs the global logger.  Returns `false` if a logger was already installed (for
    /// example by the host, or by an earlier call), in which case the existing logger is kept.
    pub fn init(&self) -> bool {
        crate::platform_impl::init_with_filter(&self.filter_string())
    }
}


// End of File
