use crate::cache::CacheEngine;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::DirdexConfig;
use crate::error::Result;
use crate::remote::RemoteFetcher;
use crate::store::CacheStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    /// Show configuration plus current cache status.
    Show,
    /// Remove both cache artifacts.
    ClearCache,
}

pub fn run<S: CacheStore, R: RemoteFetcher>(
    engine: &mut CacheEngine<S, R>,
    config: &DirdexConfig,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match action {
        ConfigAction::Show => {
            result.config = Some(config.clone());
            result.cache_status = Some(engine.status());
        }
        ConfigAction::ClearCache => {
            engine.clear()?;
            result.add_message(CmdMessage::success("Cache cleared successfully"));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_support::{sample, FakeFetcher};
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, Utc};

    #[test]
    fn test_show_includes_status_and_config() {
        let store = InMemoryStore::seeded(vec![sample("a")], Utc::now());
        let mut engine = CacheEngine::new(store, FakeFetcher::failing(), Duration::hours(24));
        let config = DirdexConfig::default();

        let result = run(&mut engine, &config, ConfigAction::Show).unwrap();
        let status = result.cache_status.unwrap();
        assert!(status.present);
        assert_eq!(status.count, 1);
        assert!(result.config.is_some());
    }

    #[test]
    fn test_clear_cache_empties_store() {
        let store = InMemoryStore::seeded(vec![sample("a")], Utc::now());
        let mut engine = CacheEngine::new(store, FakeFetcher::failing(), Duration::hours(24));
        let config = DirdexConfig::default();

        run(&mut engine, &config, ConfigAction::ClearCache).unwrap();

        let status = engine.status();
        assert!(!status.present);
        assert_eq!(status.count, 0);
    }
}
