//! Rolling file logs for the flow view engine.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once per process.
//! - Route panics into the log as single-line events.
//!
//! # Invariants
//! - Repeating `init_logging` with the same level and directory is a no-op.
//! - A second call with a different level or directory fails; the first wins.
//! - Setup errors are returned as text, never raised as panics.
//! - Events carry ids and counts only, never record text.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_BASENAME: &str = "flowview";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static LOGGER: OnceCell<RunningLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Accepted verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn parse(raw: &str) -> Result<Self, String> {
        let level = match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            other => {
                return Err(format!(
                    "log level `{other}` is not one of trace|debug|info|warn|error"
                ))
            }
        };
        Ok(level)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    level: LogLevel,
    log_dir: PathBuf,
}

impl LogTarget {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = LogLevel::parse(level)?;
        let dir = log_dir.trim();
        if dir.is_empty() {
            return Err("log directory is required".to_string());
        }
        let log_dir = PathBuf::from(dir);
        if log_dir.is_relative() {
            return Err(format!("log directory `{dir}` is not absolute"));
        }
        Ok(Self { level, log_dir })
    }

    fn check_same_as(&self, running: &LogTarget) -> Result<(), String> {
        if self == running {
            return Ok(());
        }
        Err(format!(
            "logging is already running at level `{}` in `{}`; refusing to switch to level `{}` in `{}`",
            running.level.as_str(),
            running.log_dir.display(),
            self.level.as_str(),
            self.log_dir.display()
        ))
    }
}

struct RunningLogger {
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Starts logging at `level` into the absolute directory `log_dir`.
///
/// # Errors
/// - Unknown level, or a blank/relative directory.
/// - The directory cannot be created or the backend fails to start.
/// - Logging already runs with another level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogTarget::parse(level, log_dir)?;
    let running = LOGGER.get_or_try_init(|| start(requested.clone()))?;
    requested.check_same_as(&running.target)
}

/// Level and directory of the running logger, if started.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGER
        .get()
        .map(|running| (running.target.level.as_str(), running.target.log_dir.clone()))
}

/// Level hosts should request when they have no preference.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn start(target: LogTarget) -> Result<RunningLogger, String> {
    std::fs::create_dir_all(&target.log_dir)
        .map_err(|err| format!("cannot create `{}`: {err}", target.log_dir.display()))?;

    let handle = Logger::try_with_str(target.level.as_str())
        .map_err(|err| format!("logger rejected level `{}`: {err}", target.level.as_str()))?
        .log_to_file(
            FileSpec::default()
                .directory(&target.log_dir)
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("logger backend failed to start: {err}"))?;

    if PANIC_HOOK.set(()).is_ok() {
        route_panics_to_log();
    }

    info!(
        "event=logging_init module=logging status=ok os={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        target.level.as_str(),
        target.log_dir.display()
    );

    Ok(RunningLogger {
        target,
        _handle: handle,
    })
}

fn route_panics_to_log() {
    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let at = match panic.location() {
            Some(location) => format!("{}:{}", location.file(), location.line()),
            None => "unknown".to_string(),
        };
        let payload = panic_text(panic.payload());
        error!(
            "event=panic module=logging status=error at={} payload={}",
            at,
            one_line(&payload, PANIC_TEXT_LIMIT)
        );
        chained(panic);
    }));
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-text payload>".to_string()
    }
}

/// Collapses line breaks and truncates to `limit` chars, marking the cut.
fn one_line(text: &str, limit: usize) -> String {
    let mut out = String::with_capacity(text.len().min(limit) + 3);
    for (taken, ch) in text.chars().enumerate() {
        if taken == limit {
            out.push_str("...");
            break;
        }
        out.push(if ch == '\n' || ch == '\r' { ' ' } else { ch });
    }
    out
}
