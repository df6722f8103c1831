#![deny(missing_docs)]
//! Logging macros and test logger shared by the coordinate lookup crates.
//!
//! All crates log through the `coord_*` macros so the call sites stay
//! independent of the logging facade. Records keep their module path as
//! target, which is what [`initialize_for_tests`] filters on.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

/// Target prefix shared by every crate of the workspace.
pub const TARGET_PREFIX: &str = "coord_";

/// Environment variable selecting the test log level (`off`, `error`, ...,
/// `trace`).
pub const TEST_LEVEL_ENV: &str = "COORD_TEST_LOG";

#[doc(hidden)]
#[macro_export]
macro_rules! __coord_log {
    ($level:expr, $($arg:tt)*) => {{
        log::log!($level, $($arg)*);
    }};
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! coord_trace {
    ($($arg:tt)*) => { $crate::__coord_log!(log::Level::Trace, $($arg)*) };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! coord_debug {
    ($($arg:tt)*) => { $crate::__coord_log!(log::Level::Debug, $($arg)*) };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! coord_info {
    ($($arg:tt)*) => { $crate::__coord_log!(log::Level::Info, $($arg)*) };
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! coord_warn {
    ($($arg:tt)*) => { $crate::__coord_log!(log::Level::Warn, $($arg)*) };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! coord_error {
    ($($arg:tt)*) => { $crate::__coord_log!(log::Level::Error, $($arg)*) };
}

/// Installs a terminal logger for integration tests.
///
/// Only records from the workspace crates pass; HTTP stack and mock server
/// chatter is filtered out. The level comes from [`TEST_LEVEL_ENV`], else
/// debug in debug builds and info otherwise. No-op when a logger is already
/// installed.
pub fn initialize_for_tests() {
    let level = test_level(std::env::var(TEST_LEVEL_ENV).ok().as_deref());
    let config = ConfigBuilder::new()
        .add_filter_allow_str(TARGET_PREFIX)
        .build();

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Resolves the test log level from the raw environment value.
pub fn test_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}
