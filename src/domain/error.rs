use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the whole run before (or instead of) any batch work.
///
/// Per-item failures never show up here; they are carried by
/// [`DownloadOutcome`](super::DownloadOutcome).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read list file {}: {source}", .path.display())]
    ListFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
