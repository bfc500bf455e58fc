use crate::cache::CacheEngine;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::CacheStore;

/// Explicit user-requested refresh. Unlike the implicit read path this
/// propagates every failure — a successful `sync` is a real health check.
pub fn run<S: CacheStore, R: RemoteFetcher>(
    engine: &mut CacheEngine<S, R>,
    cancel: &CancelToken,
) -> Result<CmdResult> {
    let count = engine.sync(cancel)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cache synced successfully ({} directories)",
        count
    )));
    Ok(result)
}
