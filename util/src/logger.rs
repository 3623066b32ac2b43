//! Logger setup for the console executables
//!
//! Two sinks are used: the session log file, which receives everything down to the configured
//! level, and stdout, which the operator console shares with its prompt and so is normally
//! restricted to warnings and errors.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Levels applied to each log sink.
#[derive(Debug, Clone, Copy)]
pub struct LogLevels {
    /// Minimum level written to the session log file.
    pub file: LevelFilter,

    /// Minimum level echoed to stdout.
    pub stdout: LevelFilter,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected the file log level to be at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LogLevels {
    fn default() -> Self {
        Self {
            file: LevelFilter::Debug,
            stdout: LevelFilter::Warn,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - `levels.file` must be `Info` or more verbose, the session log is the record of the run.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(levels: LogLevels, session: &session::Session) -> Result<(), LoggerInitError> {
    if levels.file < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(levels.file));
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    // The root dispatch passes everything either sink may want, each child filters further
    let root_level = std::cmp::max(levels.file, levels.stdout);

    fern::Dispatch::new()
        .format(|out, message, record| {
            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(root_level)
        .level_for("rustyline", LevelFilter::Info)
        .chain(
            fern::Dispatch::new()
                .level(levels.stdout)
                .chain(std::io::stdout()),
        )
        .chain(fern::Dispatch::new().level(levels.file).chain(log_file))
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    File log level: {:?}", levels.file);
    info!("    Stdout log level: {:?}", levels.stdout);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}
