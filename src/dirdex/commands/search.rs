use crate::cache::CacheEngine;
use crate::commands::{list, CmdResult};
use crate::error::Result;
use crate::model::{FilterSpec, SortKey};
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::CacheStore;

/// Free-text search over name and description.
pub fn run<S: CacheStore, R: RemoteFetcher>(
    engine: &mut CacheEngine<S, R>,
    cancel: &CancelToken,
    force_refresh: bool,
    query: &str,
    sort: SortKey,
    limit: usize,
) -> Result<CmdResult> {
    let spec = FilterSpec {
        query: Some(query.to_string()),
        sort,
        limit,
        ..Default::default()
    };
    list::run(engine, cancel, force_refresh, &spec)
}
