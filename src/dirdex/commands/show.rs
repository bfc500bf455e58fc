use crate::commands::CmdResult;
use crate::error::Result;
use crate::remote::{CancelToken, RemoteFetcher};

/// Fetch one directory by slug, straight from the remote. The detail view
/// always shows live data and never touches the cache.
pub fn run<R: RemoteFetcher>(remote: &R, cancel: &CancelToken, slug: &str) -> Result<CmdResult> {
    let directory = remote.fetch_by_slug(cancel, slug)?;
    Ok(CmdResult::default().with_directory(directory))
}
