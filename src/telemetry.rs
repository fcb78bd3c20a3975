//! Telemetry: File-backed `tracing` setup for full-screen programs.
//!
//! The screen is owned by the text box, so logs never go to stderr. With
//! no log file, no subscriber is installed and events are discarded.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TYPEBOX_LOG";

/// Keeps the background log writer alive; drop it last.
#[derive(Debug)]
pub struct TelemetryGuard {
    guard: Option<WorkerGuard>,
}

impl TelemetryGuard {
    const fn disabled() -> Self {
        Self { guard: None }
    }

    /// Check whether a subscriber was installed.
    pub const fn is_enabled(&self) -> bool {
        self.guard.is_some()
    }
}

/// Install a subscriber writing to `log_file`, appending.
///
/// The filter comes from [`LOG_ENV`], falling back to `default_level`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_tracing(
    log_file: Option<&Path>,
    default_level: &str,
) -> std::io::Result<TelemetryGuard> {
    let Some(path) = log_file else {
        return Ok(TelemetryGuard::disabled());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(writer);

    if subscriber.try_init().is_err() {
        return Ok(TelemetryGuard::disabled());
    }

    Ok(TelemetryGuard {
        guard: Some(guard),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_installs_nothing() {
        let guard = init_tracing(None, "debug").unwrap();
        assert!(!guard.is_enabled());
    }

    #[test]
    fn test_unwritable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("typebox.log");
        assert!(init_tracing(Some(&missing), "info").is_err());
    }
}
