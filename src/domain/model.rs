use std::fmt;
use std::path::PathBuf;

/// One file to retrieve: `base_url/filename` saved as `save_dir/filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub base_url: String,
    pub filename: String,
    pub save_dir: PathBuf,
}

impl DownloadRequest {
    pub fn new(
        base_url: impl Into<String>,
        filename: impl Into<String>,
        save_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            filename: filename.into(),
            save_dir: save_dir.into(),
        }
    }

    /// Local path the response body is written to.
    pub fn destination(&self) -> PathBuf {
        // A leading separator would make `join` discard `save_dir`
        self.save_dir.join(self.filename.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadStatus {
    Fetched,
    NotFound,
    WriteError,
    DecompressError,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DownloadStatus::Fetched => "fetched",
            DownloadStatus::NotFound => "not found",
            DownloadStatus::WriteError => "write error",
            DownloadStatus::DecompressError => "decompress error",
        };
        f.write_str(name)
    }
}

/// Terminal result of fetching and storing one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub filename: String,
    pub status: DownloadStatus,
    /// HTTP status code or error message for anything but `Fetched`.
    pub detail: Option<String>,
}

impl DownloadOutcome {
    pub fn fetched(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: DownloadStatus::Fetched,
            detail: None,
        }
    }

    pub fn failed(
        filename: impl Into<String>,
        status: DownloadStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            status,
            detail: Some(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DownloadStatus::Fetched
    }
}

/// Every outcome of one batch run, in completion order.
///
/// Holds exactly one entry per input filename, duplicates included. Callers
/// should not rely on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    outcomes: Vec<DownloadOutcome>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn count(&self, status: DownloadStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DownloadOutcome> {
        self.outcomes.iter()
    }
}

impl From<Vec<DownloadOutcome>> for BatchResult {
    fn from(outcomes: Vec<DownloadOutcome>) -> Self {
        Self { outcomes }
    }
}

impl IntoIterator for BatchResult {
    type Item = DownloadOutcome;
    type IntoIter = std::vec::IntoIter<DownloadOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a DownloadOutcome;
    type IntoIter = std::slice::Iter<'a, DownloadOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    NotStarted,
    Running,
    Completed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::NotStarted => "not started",
            BatchState::Running => "running",
            BatchState::Completed => "completed",
        };
        f.write_str(name)
    }
}
