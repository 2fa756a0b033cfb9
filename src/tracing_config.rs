use std::{env, fs, io, process};

use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{Builder, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
    Result, StrataError,
    config::{LogFormat, LoggingConfig},
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize tracing from logging settings
///
/// Console output goes to stderr so command output on stdout stays clean.
/// `RUST_LOG` takes precedence over `LOG_LEVEL` when set. If `LOG_DIR` is
/// set, records are also written to a daily rolling file in that directory;
/// the returned guard flushes it and must be kept alive.
///
/// # Errors
/// Returns `StrataError::Logging` if the log directory cannot be prepared
/// or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    const DAYS_TO_KEEP: usize = 7;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let mut layers = vec![console_layer(config)];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        fs::create_dir_all(log_dir).map_err(|e| StrataError::io(e, log_dir))?;

        let file_appender = Builder::new()
            .rotation(Rotation::DAILY)
            .max_log_files(DAYS_TO_KEEP)
            .filename_prefix("strata")
            .filename_suffix("log")
            .build(log_dir)
            .map_err(|e| StrataError::Logging(e.to_string()))?;
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

        layers.push(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed(),
        );
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| StrataError::Logging(e.to_string()))?;

    Ok(guard)
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);

    match (config.log_format, config.log_timestamps) {
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => layer
            .pretty()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        (LogFormat::Pretty, false) => layer
            .pretty()
            .with_thread_ids(true)
            .with_thread_names(true)
            .without_time()
            .boxed(),
    }
}

/// Logs the platform and build details of the running process.
pub fn log_runtime_info() {
    info!(
        os = env::consts::OS,
        family = env::consts::FAMILY,
        arch = env::consts::ARCH,
        pid = process::id(),
        "Platform"
    );
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %chrono::Local::now().to_rfc3339(),
        "Strata"
    );
}
