use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::{FetchConfig, DEFAULT_BASE_URL};
use crate::utils::default_pool_size;

/// Parallel downloader for ocean color data files.
///
/// Every file is fetched from the base URL, saved into the save directory and
/// then decompressed in place.
#[derive(Debug, Parser)]
#[command(name = "ocdownload", version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to save downloaded files
    #[arg(short, long, default_value = "./", global = true)]
    pub savedir: PathBuf,

    /// Augment verbosity: also log to stderr, at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// URL every filename is resolved against
    #[arg(short = 'u', long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Number of concurrent downloads [default: number of CPUs]
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// File the log is written to
    #[arg(long, default_value = "ocd.log", global = true)]
    pub log_file: PathBuf,

    /// Program run as `<PROGRAM> -d <FILE>` after each download
    #[arg(long, default_value = "uncompress", global = true)]
    pub decompress_cmd: String,

    /// Keep downloaded files as they are
    #[arg(long, global = true, conflicts_with = "decompress_cmd")]
    pub no_decompress: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Use a text file listing the desired files, one per line
    #[command(alias = "useList")]
    UseList {
        /// Path to the list file
        #[arg(short = 'p', long)]
        filepath: PathBuf,
    },
}

impl Cli {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            save_dir: self.savedir.clone(),
            pool_size: self.jobs.unwrap_or_else(default_pool_size),
            decompress_program: (!self.no_decompress).then(|| self.decompress_cmd.clone()),
            decompress_args: vec!["-d".to_string()],
        }
    }
}
