//! Logging setup
//!
//! `RUST_LOG` wins over the configured level. With a log directory, output
//! goes to a daily rolling file instead of stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "canteen-admin.log";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,canteen_admin={level},canteen_client={level},shared={level}")))
}

/// Create the log directory, reporting on stderr when that fails
fn prepare_log_dir(dir: &Path) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "canteen-admin: cannot create log directory {}: {e}; logging to stderr",
                dir.display()
            );
            false
        }
    }
}

/// Initialize tracing. Keep the returned guard alive until exit so the file
/// writer flushes.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = env_filter(level);

    if let Some(dir) = log_dir
        && prepare_log_dir(dir)
    {
        let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE));
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer);
        if let Err(e) = tracing_subscriber::registry().with(filter).with(file_layer).try_init() {
            eprintln!("canteen-admin: tracing already initialized: {e}");
        }
        return Some(guard);
    }

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    if let Err(e) = tracing_subscriber::registry().with(filter).with(stderr_layer).try_init() {
        eprintln!("canteen-admin: tracing already initialized: {e}");
    }
    if let Some(dir) = log_dir {
        tracing::warn!(dir = %dir.display(), "Log directory unavailable, logging to stderr");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs").join("nested");
        assert!(prepare_log_dir(&dir));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_unusable_log_dir_falls_back_to_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let dir = file.join("logs");
        assert!(!prepare_log_dir(&dir));

        assert!(init_logging("info", Some(&dir)).is_none());
    }
}
