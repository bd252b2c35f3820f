#![deny(missing_docs)]
//! Shared logging utilities for the blog PDF workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the file logger used by the binary and a minimal test initializer.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

/// `log::trace!` routed through this crate, so callers need no `log` dependency.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => { $crate::__log::trace!($($arg)*) };
}

/// `log::debug!` counterpart of [`engine_trace!`].
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => { $crate::__log::debug!($($arg)*) };
}

/// `log::info!` counterpart of [`engine_trace!`].
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => { $crate::__log::info!($($arg)*) };
}

/// `log::warn!` counterpart of [`engine_trace!`].
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => { $crate::__log::warn!($($arg)*) };
}

/// `log::error!` counterpart of [`engine_trace!`].
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => { $crate::__log::error!($($arg)*) };
}

/// Install a file logger writing to `log_file`, truncating it first.
///
/// A file that cannot be created is reported on stderr and no logger is
/// installed; the run itself never depends on logging being available.
pub fn initialize(log_file: &Path, level: LevelFilter) {
    match File::create(log_file) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {log_file:?}: {err}");
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // reqwest/hyper chatter is not useful in the run log.
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}

/// Terminal logger for tests, at debug level in debug builds.
///
/// Every test may call this; only the first call in a process installs a logger.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
