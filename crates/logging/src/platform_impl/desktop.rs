// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

pub(crate) fn init_with_filter(filter_string: &str) -> bool {
    // Use env_logger's builder API to avoid unsafe set_var call
    let mut builder = if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_string))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.try_init().is_ok()
}

// End of File
