//! Logging setup for activity-check.
//!
//! Human-readable logs go to stderr so stdout stays pure JSON. When a logs
//! directory is available a daily rolling file gets the same events.

use std::env;
use std::path::{Path, PathBuf};

use activity_core::StorageConfig;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEBUG_ENV: &str = "ACTIVITY_DEBUG_LOG";
const LOG_FILE_PREFIX: &str = "activity-check";

fn debug_forced() -> bool {
    env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn filter() -> EnvFilter {
    if debug_forced() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// File logs go under `<root>/logs`, but only once the data root exists.
/// Inspecting a store elsewhere never creates the default root.
pub fn file_log_dir(storage: &StorageConfig) -> Option<PathBuf> {
    storage.root().is_dir().then(|| storage.logs_dir())
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// or buffered file lines are lost.
pub fn init(logs_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match logs_dir.and_then(file_appender) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(UtcTime::rfc_3339());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

fn file_appender(dir: &Path) -> Option<RollingFileAppender> {
    if let Err(err) = fs_err::create_dir_all(dir) {
        eprintln!("activity-check: file logging disabled: {}", err);
        return None;
    }

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(|err| eprintln!("activity-check: file logging disabled: {}", err))
        .ok()
}
