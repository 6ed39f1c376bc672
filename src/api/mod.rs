pub mod client;
pub mod decompress;
pub mod models;

pub use client::FileClient;
pub use decompress::CommandDecompressor;
pub use models::{FetchConfig, DEFAULT_BASE_URL};
