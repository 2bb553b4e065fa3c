//! Initialisation of the program logger.
//!
//! Messages go to the console (warnings and errors to stderr, everything else to stdout) and,
//! when ranking a scenario, to a pair of log files in the output folder. Console output is
//! coloured by level when writing to a terminal.
use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Level, LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// Set once the logger has been installed
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the H2SITING_LOG_LEVEL
/// environment variable or the settings.toml file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The environment variable used to override the log level
pub const LOG_LEVEL_ENV_VAR: &str = "H2SITING_LOG_LEVEL";

/// Log file for messages below warning level
const LOG_INFO_FILE_NAME: &str = "h2siting_info.log";

/// Log file for warnings and errors
const LOG_ERROR_FILE_NAME: &str = "h2siting_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Initialise the program logger.
///
/// The level is taken from the `H2SITING_LOG_LEVEL` environment variable if set, otherwise from
/// `settings.toml`, otherwise [`DEFAULT_LOG_LEVEL`]. Recognised levels are `off`, `error`, `warn`,
/// `info`, `debug` and `trace` (case insensitive).
///
/// The logger can only be initialised once per process.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in `settings.toml`
/// * `log_file_path`: Folder in which to create log files, if any
pub fn init(log_level_from_settings: Option<&str>, log_file_path: Option<&Path>) -> Result<()> {
    let log_level = match env::var(LOG_LEVEL_ENV_VAR) {
        Ok(level) => parse_log_level(&level)
            .with_context(|| format!("Invalid value for {LOG_LEVEL_ENV_VAR}"))?,
        Err(_) => parse_log_level(log_level_from_settings.unwrap_or(DEFAULT_LOG_LEVEL))?,
    };

    let mut dispatch = Dispatch::new().chain(console_dispatch(log_level));
    if let Some(log_file_path) = log_file_path {
        dispatch = dispatch.chain(file_dispatch(log_file_path, log_level)?);
    }

    dispatch.apply().context("Logger already initialised")?;
    let _ = LOGGER_INIT.set(());

    Ok(())
}

/// Convert a log level name (case insensitive) to a [`LevelFilter`]
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Whether a message is a warning or error
fn is_warning_or_worse(level: Level) -> bool {
    level <= Level::Warn
}

/// Messages for the terminal: warnings and errors on stderr, the rest on stdout
fn console_dispatch(log_level: LevelFilter) -> Dispatch {
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let colour_stdout = std::io::stdout().is_terminal().then_some(colours);
    let colour_stderr = std::io::stderr().is_terminal().then_some(colours);

    let stdout = Dispatch::new()
        .filter(|metadata| !is_warning_or_worse(metadata.level()))
        .format(move |out, message, record| {
            write_log_coloured(out, message, record, colour_stdout.as_ref());
        })
        .level(log_level)
        .chain(std::io::stdout());
    let stderr = Dispatch::new()
        .filter(|metadata| is_warning_or_worse(metadata.level()))
        .format(move |out, message, record| {
            write_log_coloured(out, message, record, colour_stderr.as_ref());
        })
        .level(log_level)
        .chain(std::io::stderr());

    Dispatch::new().chain(stdout).chain(stderr)
}

/// Messages for the log files in `log_file_path`.
///
/// The info file records at least `info` level messages, even if the console is quieter, and
/// warnings are always written to the error file.
fn file_dispatch(log_file_path: &Path, log_level: LevelFilter) -> Result<Dispatch> {
    let create = |file_name: &str| {
        let file_path = log_file_path.join(file_name);
        File::create(&file_path)
            .with_context(|| format!("Could not create log file {}", file_path.display()))
    };

    let info = Dispatch::new()
        .filter(|metadata| !is_warning_or_worse(metadata.level()))
        .format(write_log_plain)
        .level(log_level.max(LevelFilter::Info))
        .chain(create(LOG_INFO_FILE_NAME)?);
    let errors = Dispatch::new()
        .filter(|metadata| is_warning_or_worse(metadata.level()))
        .format(write_log_plain)
        .level(LevelFilter::Warn)
        .chain(create(LOG_ERROR_FILE_NAME)?);

    Ok(Dispatch::new().chain(info).chain(errors))
}

/// Format a log line as `[time level target] message`
fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_coloured(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colours: Option<&ColoredLevelConfig>,
) {
    match colours {
        Some(colours) => write_log(out, colours.color(record.level()), record.target(), message),
        None => write_log_plain(out, message, record),
    }
}
