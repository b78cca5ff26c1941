#![deny(missing_docs)]
//! Shared logging utilities for the gridfetch workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the logger setup used by binaries, and a minimal test initializer.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log target shared by every `engine_*` macro, so batch diagnostics can be
/// filtered independently from dependency noise.
pub const ENGINE_TARGET: &str = "gridfetch";

/// Logs a trace-level message under the engine target.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::ENGINE_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the engine target.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::ENGINE_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the engine target.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::ENGINE_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the engine target.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::ENGINE_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the engine target.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::ENGINE_TARGET, $($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to a log file only.
    File,
    /// Write to the terminal only.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Installs the global logger for a binary.
///
/// `log_file` is only used for [`LogDestination::File`] and
/// [`LogDestination::Both`]. If the file cannot be created the terminal logger
/// is still installed (for `Both`) and a warning is printed to stderr.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create log file {log_file:?}: {err}"),
        }
    }
    if loggers.is_empty() {
        return;
    }

    // A logger may already be installed (e.g. when embedded); keep the first one.
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_expand_under_engine_target() {
        initialize_for_tests();
        engine_trace!("trace {}", 1);
        engine_debug!("debug {}", 2);
        engine_info!("info {}", 3);
        engine_warn!("warn {}", 4);
        engine_error!("error {}", 5);
        assert_eq!(ENGINE_TARGET, "gridfetch");
    }

    #[test]
    fn initialize_tolerates_unwritable_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened as a log file.
        initialize(LogDestination::File, LevelFilter::Info, dir.path());
    }
}
