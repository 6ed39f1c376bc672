use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::AppError;

/// Install the process-wide subscriber.
///
/// Everything goes to `log_file`. With `verbose` the level drops to debug and
/// the same events are mirrored to stderr. `RUST_LOG` overrides the level.
pub fn init(verbose: bool, log_file: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| AppError::Logging(format!("{}: {}", log_file.display(), e)))?;

    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let file_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
    let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
