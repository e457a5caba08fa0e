use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::LOG_FILE_PREFIX;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber: stdout plus a daily-rolling file under `log_dir`
/// when one is available. The returned guard must outlive the app.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let Some(log_dir) = log_dir else {
        let _ = tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer())
            .try_init();
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init();
    if installed.is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "desktop logging initialized");
    Some(guard)
}
