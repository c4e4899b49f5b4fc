//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::persistence::data_dir;
use crate::core::constants::LOG_FILE_NAME;

/// Installs the global subscriber writing to `bramble.log` in `dir`, or the
/// data directory when `dir` is None. `RUST_LOG` overrides the `info` default.
///
/// Keep the returned guard alive for the whole run or buffered lines are lost.
pub fn init_logging(dir: Option<&Path>) -> io::Result<(PathBuf, WorkerGuard)> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => data_dir()?,
    };
    fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    // A subscriber may already be set (tests, embedding); keep that one
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    let path = dir.join(LOG_FILE_NAME);
    tracing::info!(path = %path.display(), "logging initialized");
    Ok((path, guard))
}
