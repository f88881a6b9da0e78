//! Session logging for the pattern executables

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use fern;
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Least verbose filter an executable may run with. Warnings and errors are always recorded.
const QUIETEST_LEVEL: LevelFilter = LevelFilter::Info;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while starting the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Log level `{0}` would hide info records, use `info`, `debug` or `trace`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Could not open the session log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("Could not install the global logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Start logging for a pattern session.
///
/// Each record goes to stdout and to the session log file, stamped with the seconds since the
/// session epoch. Debug and trace records also carry their module path so generator internals
/// can be told apart.
///
/// Only one logger can be installed per process, so a second call fails with `FernInitError`.
pub fn logger_init(
    min_level: LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    if !is_allowed(min_level) {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file =
        fern::log_file(&session.log_file_path).map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            let stamp = session::get_elapsed_seconds();
            let tag = level_to_str(record.level());

            match record.level() {
                log::Level::Debug | log::Level::Trace => out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    stamp,
                    tag,
                    record.target(),
                    message
                )),
                _ => out.finish(format_args!("[{:10.6} {}] {}", stamp, tag, message)),
            }
        })
        .level(min_level)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logger started at {:?}", min_level);
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Writing to {:?}", session.log_file_path);

    Ok(())
}

/// Read the `--log-level` argument of an executable.
///
/// Names are matched case-insensitively. Unknown names, and levels quieter than `info`, give
/// `info`.
pub fn level_from_str(level: &str) -> LevelFilter {
    level
        .parse::<LevelFilter>()
        .ok()
        .filter(|&l| is_allowed(l))
        .unwrap_or(QUIETEST_LEVEL)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn is_allowed(level: LevelFilter) -> bool {
    level >= QUIETEST_LEVEL
}

/// Three letter coloured tag for a record's level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}
