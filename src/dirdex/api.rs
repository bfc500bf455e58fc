//! # API Facade
//!
//! Thin entry point over the command layer, the single surface any UI
//! talks to. It dispatches, it does not decide: business logic lives in
//! `commands/*.rs`, persistence policy in `cache.rs`.
//!
//! `DirdexApi<S, R>` is generic over both the cache store and the remote
//! fetcher, so tests can wire `InMemoryStore` plus a fake fetcher and
//! exercise the full command surface without disk or network.

use std::path::Path;

use crate::cache::CacheEngine;
use crate::commands;
use crate::config::DirdexConfig;
use crate::error::Result;
use crate::model::{ExportFormat, FilterSpec, SortKey};
use crate::remote::{CancelToken, RemoteFetcher};
use crate::store::CacheStore;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct DirdexApi<S: CacheStore, R: RemoteFetcher> {
    engine: CacheEngine<S, R>,
    config: DirdexConfig,
}

impl<S: CacheStore, R: RemoteFetcher> DirdexApi<S, R> {
    pub fn new(engine: CacheEngine<S, R>, config: DirdexConfig) -> Self {
        Self { engine, config }
    }

    pub fn list(
        &mut self,
        cancel: &CancelToken,
        force_refresh: bool,
        spec: &FilterSpec,
    ) -> Result<CmdResult> {
        commands::list::run(&mut self.engine, cancel, force_refresh, spec)
    }

    pub fn search(
        &mut self,
        cancel: &CancelToken,
        force_refresh: bool,
        query: &str,
        sort: SortKey,
        limit: usize,
    ) -> Result<CmdResult> {
        commands::search::run(&mut self.engine, cancel, force_refresh, query, sort, limit)
    }

    pub fn show(&self, cancel: &CancelToken, slug: &str) -> Result<CmdResult> {
        commands::show::run(self.engine.remote(), cancel, slug)
    }

    pub fn export(
        &mut self,
        cancel: &CancelToken,
        force_refresh: bool,
        spec: &FilterSpec,
        format: ExportFormat,
        output: &Path,
    ) -> Result<CmdResult> {
        commands::export::run(&mut self.engine, cancel, force_refresh, spec, format, output)
    }

    pub fn sync(&mut self, cancel: &CancelToken) -> Result<CmdResult> {
        commands::sync::run(&mut self.engine, cancel)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.engine, &self.config, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_support::{sample, FakeFetcher};
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, Utc};

    fn api_with_cache(slugs: &[&str]) -> DirdexApi<InMemoryStore, FakeFetcher> {
        let records = slugs.iter().map(|s| sample(s)).collect();
        let store = InMemoryStore::seeded(records, Utc::now());
        let engine = CacheEngine::new(store, FakeFetcher::failing(), Duration::hours(24));
        DirdexApi::new(engine, DirdexConfig::default())
    }

    #[test]
    fn test_list_dispatches() {
        let mut api = api_with_cache(&["alpha", "beta"]);
        let result = api
            .list(&CancelToken::new(), false, &FilterSpec::default())
            .unwrap();
        assert_eq!(result.listed.len(), 2);
    }

    #[test]
    fn test_search_dispatches_with_query() {
        let mut api = api_with_cache(&["alpha", "beta"]);
        let result = api
            .search(&CancelToken::new(), false, "beta", SortKey::Helpful, 0)
            .unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].slug, "beta");
    }

    #[test]
    fn test_config_show_dispatches() {
        let mut api = api_with_cache(&["alpha"]);
        let result = api.config(ConfigAction::Show).unwrap();
        assert!(result.cache_status.unwrap().present);
    }
}
