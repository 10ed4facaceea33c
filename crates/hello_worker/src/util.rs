// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Utility functions.

use log::Level;
use std::str::FromStr;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Initializes the console logger once per isolate. Unknown or missing levels
/// fall back to `info`.
pub(crate) fn init_logging(level: Option<&str>) {
    let level = parse_level(level);
    INIT_LOGGING.call_once(|| {
        console_log::init_with_level(level).expect("error initializing logger");
    });
}

fn parse_level(level: Option<&str>) -> Level {
    level
        .and_then(|level| Level::from_str(level).ok())
        .unwrap_or(Level::Info)
}
