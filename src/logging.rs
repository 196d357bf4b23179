//! Logging bootstrap.
//!
//! Log records go to stderr so stdout carries only the save confirmation.
//! Initialization happens at most once per process and never panics.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::info;
use std::sync::OnceLock;

static LOGGER: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: String,
    _handle: LoggerHandle,
}

const SUPPORTED_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Start the stderr logger with `level`.
///
/// Repeated calls with the same level are no-ops; a different level is
/// rejected.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGER.get() {
        return check_existing(state, level);
    }

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let state = LOGGER.get_or_init(|| LoggingState {
        level: level.to_string(),
        _handle: handle,
    });
    check_existing(state, level)?;

    info!(
        "event=app_start module=logging status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn check_existing(state: &LoggingState, level: &str) -> Result<(), String> {
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let trimmed = level.trim();
    SUPPORTED_LEVELS
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| format!("unsupported log level `{trimmed}`"))
}
