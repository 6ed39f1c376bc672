use std::num::NonZeroUsize;

use url::Url;

/// Append `filename` to the path of `base`, one segment per `/`.
///
/// `base` is treated as a directory whether or not it ends in `/`. The
/// filename never changes scheme, host or query: characters such as `:`,
/// `?` and `#` stay inside the path, percent-encoded where needed.
pub fn join_url(base: &str, filename: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base)?;
    base.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(filename.trim_start_matches('/').split('/'));
    Ok(base)
}

/// Number of processing units on this host, at least 1.
pub fn default_pool_size() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
