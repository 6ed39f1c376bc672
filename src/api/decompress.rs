//! Post-download decompression step

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

pub const DEFAULT_PROGRAM: &str = "uncompress";

#[derive(Error, Debug)]
pub enum DecompressError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Transforms a downloaded file in place.
#[async_trait]
pub trait Decompressor: Send + Sync {
    async fn decompress(&self, path: &Path) -> Result<(), DecompressError>;

    fn name(&self) -> &str;
}

/// Runs an external program with the file path as its last argument.
///
/// Stdout is discarded. The exit status is checked, so a failed run is
/// reported rather than ignored.
#[derive(Debug, Clone)]
pub struct CommandDecompressor {
    program: String,
    args: Vec<String>,
}

impl CommandDecompressor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Resolve the program on PATH, if it is there.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }
}

impl Default for CommandDecompressor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, vec!["-d".to_string()])
    }
}

#[async_trait]
impl Decompressor for CommandDecompressor {
    async fn decompress(&self, path: &Path) -> Result<(), DecompressError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|source| DecompressError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DecompressError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Leaves downloaded files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecompressor;

#[async_trait]
impl Decompressor for NoopDecompressor {
    async fn decompress(&self, _path: &Path) -> Result<(), DecompressError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "none"
    }
}
