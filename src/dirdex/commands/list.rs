use crate::cache::CacheEngine;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter;
use crate::model::FilterSpec;
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::CacheStore;

/// List/filter the collection: one orchestrator read followed by one
/// filter-sort-paginate pass. `search` and `filter` at the CLI level are
/// both thin wrappers over this.
pub fn run<S: CacheStore, R: RemoteFetcher>(
    engine: &mut CacheEngine<S, R>,
    cancel: &CancelToken,
    force_refresh: bool,
    spec: &FilterSpec,
) -> Result<CmdResult> {
    let records = engine.get_directories(cancel, force_refresh)?;
    let total = records.len();
    let listed = filter::filter_and_page(&records, spec);

    let mut result = CmdResult::default().with_listed(listed, total);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::warning("No directories found"));
    }
    Ok(result)
}
