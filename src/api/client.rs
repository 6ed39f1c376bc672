use std::path::PathBuf;
use std::sync::Arc;

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::decompress::{DecompressError, Decompressor};
use crate::domain::{DownloadOutcome, DownloadRequest, DownloadStatus};
use crate::utils::join_url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{}", .0.as_u16())]
    Status(StatusCode),

    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download interrupted: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("Decompression failed: {0}")]
    Decompress(#[from] DecompressError),
}

impl FetchError {
    /// Outcome classification for this failure.
    pub fn status(&self) -> DownloadStatus {
        match self {
            FetchError::InvalidUrl(_) | FetchError::Request(_) | FetchError::Status(_) => {
                DownloadStatus::NotFound
            }
            FetchError::Create { .. } | FetchError::Io(_) | FetchError::Stream(_) => {
                DownloadStatus::WriteError
            }
            FetchError::Decompress(_) => DownloadStatus::DecompressError,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Fetches single files and hands them to the decompression step.
///
/// Cheap to clone; the HTTP connection pool and decompressor are shared.
#[derive(Clone)]
pub struct FileClient {
    client: Client,
    decompressor: Arc<dyn Decompressor>,
}

impl FileClient {
    pub fn new(decompressor: Arc<dyn Decompressor>) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, decompressor))
    }

    pub fn with_client(client: Client, decompressor: Arc<dyn Decompressor>) -> Self {
        Self {
            client,
            decompressor,
        }
    }

    /// Fetch, store and decompress one file.
    ///
    /// Never fails: every problem is folded into the returned outcome so one
    /// bad item cannot abort its batch.
    pub async fn fetch(&self, req: &DownloadRequest) -> DownloadOutcome {
        match self.retrieve(req).await {
            Ok(()) => {
                info!(filename = %req.filename, "download complete");
                DownloadOutcome::fetched(&req.filename)
            }
            Err(e) => {
                let status = e.status();
                debug!(filename = %req.filename, %status, error = %e, "download failed");
                DownloadOutcome::failed(&req.filename, status, e.to_string())
            }
        }
    }

    async fn retrieve(&self, req: &DownloadRequest) -> Result<()> {
        let url = join_url(&req.base_url, &req.filename)?;
        let path = req.destination();

        info!(%url, "attempting download");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        debug!(%url, "file found");

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|source| FetchError::Create {
                path: path.clone(),
                source,
            })?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(FetchError::Stream)?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.sync_all().await?;
        drop(file);
        debug!(path = %path.display(), bytes = written, "file written");

        self.decompressor.decompress(&path).await?;
        debug!(path = %path.display(), decompressor = self.decompressor.name(), "decompressed");

        Ok(())
    }
}
