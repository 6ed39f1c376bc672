use std::path::Path;

use futures::{stream, StreamExt};
use tracing::{debug, info};

use crate::{
    api::FileClient,
    domain::{BatchResult, BatchState, DownloadRequest},
};

/// Runs a list of downloads through a bounded pool of concurrent fetches.
pub struct BatchCoordinator {
    client: FileClient,
    state: BatchState,
}

impl BatchCoordinator {
    pub fn new(client: FileClient) -> Self {
        Self {
            client,
            state: BatchState::NotStarted,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Fetch every filename and wait for all of them.
    ///
    /// At most `pool_size` fetches are in flight (0 is treated as 1). The
    /// result holds one outcome per input filename, duplicates included, in
    /// completion order. Duplicate names write the same destination path
    /// concurrently and the last writer wins.
    pub async fn run_batch(
        &mut self,
        filenames: &[String],
        base_url: &str,
        save_dir: &Path,
        pool_size: usize,
    ) -> BatchResult {
        if filenames.is_empty() {
            debug!("no filenames, nothing to dispatch");
            self.state = BatchState::Completed;
            return BatchResult::default();
        }

        let pool_size = pool_size.max(1);
        self.state = BatchState::Running;
        info!(items = filenames.len(), pool_size, "setting up parallel download");

        let client = &self.client;
        let outcomes: Vec<_> = stream::iter(filenames)
            .map(|filename| DownloadRequest::new(base_url, filename.as_str(), save_dir))
            .map(|req| async move { client.fetch(&req).await })
            .buffer_unordered(pool_size)
            .collect()
            .await;

        self.state = BatchState::Completed;
        debug!(outcomes = outcomes.len(), "batch drained");

        BatchResult::from(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decompress::NoopDecompressor;
    use crate::domain::{DownloadOutcome, DownloadStatus};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn coordinator() -> BatchCoordinator {
        BatchCoordinator::new(FileClient::new(Arc::new(NoopDecompressor)).unwrap())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn by_status(result: &BatchResult) -> HashMap<String, DownloadStatus> {
        result
            .iter()
            .map(|o| (o.filename.clone(), o.status))
            .collect()
    }

    async fn server_with(found: &[&str]) -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        for name in found {
            server
                .mock("GET", format!("/{name}").as_str())
                .with_status(200)
                .with_body(format!("contents of {name}"))
                .create_async()
                .await;
        }
        server
            .mock("GET", "/gone.Z")
            .with_status(404)
            .create_async()
            .await;
        server
    }

    #[tokio::test]
    async fn test_empty_list_dispatches_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut coordinator = coordinator();
        assert_eq!(coordinator.state(), BatchState::NotStarted);

        let result = coordinator
            .run_batch(&[], &server.url(), dir.path(), 4)
            .await;

        assert!(result.is_empty());
        assert_eq!(coordinator.state(), BatchState::Completed);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_one_outcome_per_filename_for_any_pool_size() {
        let server = server_with(&["a.Z", "b.Z", "c.Z"]).await;
        let dir = tempfile::tempdir().unwrap();
        let filenames = names(&["a.Z", "b.Z", "gone.Z", "c.Z", "a.Z"]);

        for pool_size in 0..=filenames.len() + 3 {
            let result = coordinator()
                .run_batch(&filenames, &server.url(), dir.path(), pool_size)
                .await;
            assert_eq!(result.len(), filenames.len(), "pool size {pool_size}");
            assert_eq!(result.count(DownloadStatus::Fetched), 4);
            assert_eq!(result.count(DownloadStatus::NotFound), 1);
        }
    }

    #[tokio::test]
    async fn test_pool_size_does_not_change_classification() {
        let server = server_with(&["a.Z", "b.Z"]).await;
        let dir = tempfile::tempdir().unwrap();
        let filenames = names(&["a.Z", "gone.Z", "b.Z", "unknown.Z"]);

        let serial = coordinator()
            .run_batch(&filenames, &server.url(), dir.path(), 1)
            .await;
        let parallel = coordinator()
            .run_batch(&filenames, &server.url(), dir.path(), filenames.len())
            .await;

        assert_eq!(by_status(&serial), by_status(&parallel));
        assert_eq!(by_status(&serial)["unknown.Z"], DownloadStatus::NotFound);
    }

    #[tokio::test]
    async fn test_files_land_in_save_dir() {
        let server = server_with(&["a.Z", "b.Z"]).await;
        let dir = tempfile::tempdir().unwrap();

        let result = coordinator()
            .run_batch(&names(&["a.Z", "b.Z"]), &server.url(), dir.path(), 2)
            .await;

        assert_eq!(result.failures().count(), 0);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.Z")).unwrap(),
            "contents of a.Z"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("b.Z")).unwrap(),
            "contents of b.Z"
        );
    }

    #[tokio::test]
    async fn test_write_error_does_not_abort_batch() {
        let server = server_with(&["a.Z", "b.Z"]).await;
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let result = coordinator()
            .run_batch(&names(&["a.Z", "gone.Z", "b.Z"]), &server.url(), &missing, 2)
            .await;

        let statuses = by_status(&result);
        assert_eq!(result.len(), 3);
        assert_eq!(statuses["a.Z"], DownloadStatus::WriteError);
        assert_eq!(statuses["b.Z"], DownloadStatus::WriteError);
        assert_eq!(statuses["gone.Z"], DownloadStatus::NotFound);
    }

    #[tokio::test]
    async fn test_rerun_is_deterministic() {
        let server = server_with(&["a.Z"]).await;
        let dir = tempfile::tempdir().unwrap();
        let filenames = names(&["a.Z"]);

        let mut coordinator = coordinator();
        let first = coordinator
            .run_batch(&filenames, &server.url(), dir.path(), 1)
            .await;
        let second = coordinator
            .run_batch(&filenames, &server.url(), dir.path(), 1)
            .await;

        assert_eq!(first, second);
        assert_eq!(
            second.into_iter().collect::<Vec<_>>(),
            vec![DownloadOutcome::fetched("a.Z")]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.Z")).unwrap(),
            "contents of a.Z"
        );
    }
}
