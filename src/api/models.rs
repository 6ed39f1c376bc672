use std::path::PathBuf;
use std::sync::Arc;

use super::decompress::{CommandDecompressor, Decompressor, NoopDecompressor, DEFAULT_PROGRAM};
use crate::utils::default_pool_size;

/// Ocean color data file service
pub const DEFAULT_BASE_URL: &str = "http://oceandata.sci.gsfc.nasa.gov/cgi/getfile/";

/// Configuration for a batch download
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub save_dir: PathBuf,
    pub pool_size: usize,
    /// `None` skips decompression entirely.
    pub decompress_program: Option<String>,
    pub decompress_args: Vec<String>,
}

impl FetchConfig {
    pub fn decompressor(&self) -> Arc<dyn Decompressor> {
        match &self.decompress_program {
            Some(program) => Arc::new(CommandDecompressor::new(
                program.clone(),
                self.decompress_args.clone(),
            )),
            None => Arc::new(NoopDecompressor),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            save_dir: PathBuf::from("./"),
            pool_size: default_pool_size(),
            decompress_program: Some(DEFAULT_PROGRAM.to_string()),
            decompress_args: vec!["-d".to_string()],
        }
    }
}
