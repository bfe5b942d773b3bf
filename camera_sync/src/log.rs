//! Logging for camera synchronization
//!
//! This module provides a replaceable logging sink with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs
//!
//! The host add-in, the relay and the viewer-side adapter all log through
//! the same sink so that a single custom logger captures the whole flow.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route logs elsewhere (host trace window, file, ...).
///
/// # Example
///
/// ```no_run
/// use camera_sync::camera_sync::log::{Logger, LogEntry};
///
/// struct TraceWindowLogger;
///
/// impl Logger for TraceWindowLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the host trace window...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "camera_sync::export", "camera_sync_relay::routes")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (dropped deliveries, ignored input)
    Warn,

    /// Error messages (with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render `entry` as one console line (colored unless coloring is off).
    pub fn format_entry(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            )
        } else {
            format!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            )
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", Self::format_entry(entry));
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! sync_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::camera_sync::SyncEngine::log(
            $crate::camera_sync::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// camera_sync::sync_debug!("camera_sync_relay::relay", "{} subscribers connected", 3);
/// ```
#[macro_export]
macro_rules! sync_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::camera_sync::SyncEngine::log(
            $crate::camera_sync::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! sync_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::camera_sync::SyncEngine::log(
            $crate::camera_sync::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! sync_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::camera_sync::SyncEngine::log(
            $crate::camera_sync::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! sync_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::camera_sync::SyncEngine::log_detailed(
            $crate::camera_sync::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and build the matching `Error` variant
///
/// # Example
///
/// ```no_run
/// use camera_sync::camera_sync::Error;
///
/// let err: Error = camera_sync::sync_err!("camera_sync::restore", HostPrecondition,
///     "View {} is not open", 42);
/// ```
#[macro_export]
macro_rules! sync_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::sync_error!($source, "{}", message);
        $crate::camera_sync::Error::$kind(message)
    }};
}

/// Log an ERROR message and return early with the matching `Error` variant
#[macro_export]
macro_rules! sync_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::sync_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
