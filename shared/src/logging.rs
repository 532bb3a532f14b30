//! Shared logging utilities for consistent tracing across all components

use crate::types::ProcessId;
use chrono::{DateTime, Utc};
use tracing::{error, info};

#[doc(hidden)]
pub use tracing as __tracing;

/// Build the `EnvFilter` directive string for a process at a given base level
pub fn filter_directives(process_id: &ProcessId, log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");

    match process_id {
        ProcessId::WebServer => format!(
            "webserver={base_level},engine={base_level},shared={base_level},\
             tower_http=debug,axum={base_level}"
        ),
        ProcessId::Embedded => format!("engine={base_level},shared={base_level}"),
    }
}

/// Initialize tracing subscriber with process-specific configuration.
/// Uses the global process ID, so call `ProcessId::init_*` first
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level_filter = filter_directives(ProcessId::current(), log_level);
    println!("📊 Log level: {level_filter}");

    // try_init so a second initialization (tests, embedding) is a no-op
    let _ = fmt()
        .with_env_filter(EnvFilter::new(&level_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for process-aware info logging
#[macro_export]
macro_rules! process_info {
    ($process_id:expr, $($arg:tt)*) => {
        $crate::logging::__tracing::info!(
            process = %$process_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for process-aware warning logging
#[macro_export]
macro_rules! process_warn {
    ($process_id:expr, $($arg:tt)*) => {
        $crate::logging::__tracing::warn!(
            process = %$process_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for process-aware error logging
#[macro_export]
macro_rules! process_error {
    ($process_id:expr, $($arg:tt)*) => {
        $crate::logging::__tracing::error!(
            process = %$process_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for process-aware debug logging
#[macro_export]
macro_rules! process_debug {
    ($process_id:expr, $($arg:tt)*) => {
        $crate::logging::__tracing::debug!(
            process = %$process_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(process_id: &ProcessId, details: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(process_id: &ProcessId, reason: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(process_id: &ProcessId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        process = %process_id,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(process_id: &ProcessId, message: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(process_id: &ProcessId, action: &str, details: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
