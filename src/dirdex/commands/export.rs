use std::path::Path;

use crate::cache::CacheEngine;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::export_to_path;
use crate::filter;
use crate::model::{ExportFormat, FilterSpec};
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::CacheStore;

/// Export the filtered collection to a file.
pub fn run<S: CacheStore, R: RemoteFetcher>(
    engine: &mut CacheEngine<S, R>,
    cancel: &CancelToken,
    force_refresh: bool,
    spec: &FilterSpec,
    format: ExportFormat,
    output: &Path,
) -> Result<CmdResult> {
    let records = engine.get_directories(cancel, force_refresh)?;
    let filtered = filter::filter_and_page(&records, spec);

    export_to_path(&filtered, format, output)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} directories to {}",
        filtered.len(),
        output.display()
    )));
    Ok(result)
}
