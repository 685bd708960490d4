use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::BoxError;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Writes spans and events to `kubeview.log` in `log_dir`. Only the first
/// call installs the subscriber.
pub fn setup_logger(log_dir: &Path, level: &str, _endpoint: &str) -> Result<(), BoxError> {
    let mut slot = LOG_GUARD.lock().map_err(|_| "poisoned log guard lock")?;
    if slot.is_some() {
        return Ok(());
    }

    let file = File::create(log_dir.join("kubeview.log"))?;
    let filter = EnvFilter::try_new(level)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(non_blocking_writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    *slot = Some(guard);

    Ok(())
}

/// Flushes buffered log lines.
pub fn shutdown() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        slot.take();
    }
}
