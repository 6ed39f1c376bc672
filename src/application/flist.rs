use std::path::Path;

use tracing::{info, warn};

use crate::domain::AppError;

/// Read the list file and return its filenames, one per non-blank line.
///
/// A missing or unreadable file is fatal for the run. An empty list is not;
/// it is only logged.
pub async fn load_filenames(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::ListFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filenames = parse_filenames(&contents);
    if filenames.is_empty() {
        warn!(path = %path.display(), "empty filename list");
    } else {
        info!(path = %path.display(), count = filenames.len(), "filename list populated");
    }

    Ok(filenames)
}

pub fn parse_filenames(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
