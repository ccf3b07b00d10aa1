//! Global logging for the Zxx syntax crate
//!
//! Nothing is printed until [`init_global_logging`] installs a service, so the
//! library stays quiet when embedded.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    codes::validate_codes(&[
        codes::system::INTERNAL_ERROR,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::INVALID_ENCODING,
        codes::tree::UNEXPECTED_AT_ROOT,
    ])?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether a debug event would reach any logger
pub fn debug_enabled() -> bool {
    is_initialized() && config::get_min_log_level() >= LogLevel::Debug
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Run `f` with `file_path` attached to every event logged on this thread
pub fn with_file_context<F, R>(file_path: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.replace(Some(file_path.to_path_buf())));
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn get_current_file_context() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(file) = get_current_file_context() {
        event = event.with_context("file", &file.display().to_string());
    }

    logger.log_event(event);
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Used by `log_info!`, `log_warning!` and `log_debug!`
pub fn log_plain_with_context(event: LogEvent, context: Vec<(&str, &str)>) {
    dispatch(event, context);
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_event(LogEvent::error(code, message)),
        None => eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message),
    }
}

pub fn get_system_diagnostics() -> String {
    format!(
        "=== Logging System Diagnostics ===\nInitialized: {}\n\n{}",
        is_initialized(),
        config::get_config_summary()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_is_scoped() {
        let path = PathBuf::from("outer.zxx");
        assert!(get_current_file_context().is_none());

        let seen = with_file_context(&path, || {
            let inner = with_file_context(Path::new("inner.zxx"), get_current_file_context);
            assert_eq!(inner, Some(PathBuf::from("inner.zxx")));
            get_current_file_context()
        });

        assert_eq!(seen, Some(path));
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_safe_logging_does_not_panic() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
    }
}
