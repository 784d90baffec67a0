use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WORDTYPE_LOG";
const LOG_FILE: &str = "wordtype.log";

static INIT: Once = Once::new();

/// Install a file-backed subscriber. The terminal owns stdout while a
/// session runs, so nothing is ever written there.
///
/// Returns `None` when the log file cannot be opened or a subscriber is
/// already installed. The returned guard flushes buffered lines when
/// dropped; keep it alive for the lifetime of the program.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)
        .ok()?;

    let mut guard = None;
    INIT.call_once(|| {
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("wordtype=info"));

        let installed = tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_env_filter(filter)
            .try_init()
            .is_ok();

        if installed {
            guard = Some(worker_guard);
        }
    });

    guard
}
