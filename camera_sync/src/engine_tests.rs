//! Unit tests for the SyncEngine logging facade
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::camera_sync::{Error, SyncEngine};
use crate::camera_sync::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        // Other tests in this binary log concurrently
        if entry.source == "camsync::test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_default_logger_logs_without_panic() {
    SyncEngine::reset_logger();
    SyncEngine::log(LogSeverity::Info, "camsync::test", "hello".to_string());
}

#[test]
#[serial]
fn test_custom_logger_receives_logs() {
    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);

    SyncEngine::log(LogSeverity::Info, "camsync::test", "first".to_string());
    SyncEngine::log(LogSeverity::Warn, "camsync::test", "second".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].message, "first");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert!(captured[0].file.is_none());
    }

    SyncEngine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);
    SyncEngine::reset_logger();

    SyncEngine::log(LogSeverity::Info, "camsync::test", "not captured".to_string());

    assert!(entries.lock().unwrap().is_empty());
}

#[test]
#[serial]
fn test_log_detailed_with_file_line() {
    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);

    SyncEngine::log_detailed(
        LogSeverity::Error,
        "camsync::test",
        "boom".to_string(),
        "reverse.rs",
        12,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured[0].file, Some("reverse.rs"));
        assert_eq!(captured[0].line, Some(12));
    }

    SyncEngine::reset_logger();
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);

    crate::sync_trace!("camsync::test", "t {}", 1);
    crate::sync_debug!("camsync::test", "d {}", 2);
    crate::sync_info!("camsync::test", "i {}", 3);
    crate::sync_warn!("camsync::test", "w {}", 4);
    crate::sync_error!("camsync::test", "e {}", 5);

    {
        let captured = entries.lock().unwrap();
        let severities: Vec<LogSeverity> = captured.iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]);
        assert_eq!(captured[4].message, "e 5");
        assert!(captured[4].file.is_some());
    }

    SyncEngine::reset_logger();
}

#[test]
#[serial]
fn test_sync_err_logs_and_builds_error() {
    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);

    let err = crate::sync_err!("camsync::test", HostPrecondition, "view {} not open", 7);

    assert_eq!(err, Error::HostPrecondition("view 7 not open".to_string()));
    assert_eq!(entries.lock().unwrap().len(), 1);

    SyncEngine::reset_logger();
}

#[test]
#[serial]
fn test_sync_bail_returns_early() {
    fn check(value: u32) -> crate::camera_sync::Result<u32> {
        if value == 0 {
            crate::sync_bail!("camsync::test", MalformedPayload, "value must be non-zero");
        }
        Ok(value)
    }

    let (logger, entries) = CaptureLogger::new();
    SyncEngine::set_logger(logger);

    assert_eq!(check(3), Ok(3));
    assert!(matches!(check(0), Err(Error::MalformedPayload(_))));
    assert_eq!(entries.lock().unwrap().len(), 1);

    SyncEngine::reset_logger();
}
