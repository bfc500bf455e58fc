use super::{CacheMetadata, CacheStore};
use crate::error::{DirdexError, Result};
use crate::model::Directory;

/// In-memory cache store for tests.
///
/// Mirrors the `FileStore` contract: a store with no saved snapshot fails
/// loads with `CacheUnreadable`. The `fail_*` knobs let orchestrator tests
/// drive the degraded paths (corrupt cache, full disk) without touching a
/// filesystem.
#[derive(Default)]
pub struct InMemoryStore {
    records: Option<Vec<Directory>>,
    metadata: Option<CacheMetadata>,
    pub fail_loads: bool,
    pub fail_saves: bool,
    pub save_calls: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a snapshot with metadata stamped at the given time.
    pub fn seeded(records: Vec<Directory>, last_updated: chrono::DateTime<chrono::Utc>) -> Self {
        let metadata = CacheMetadata {
            last_updated,
            version: super::CACHE_VERSION.to_string(),
            count: records.len(),
        };
        Self {
            records: Some(records),
            metadata: Some(metadata),
            ..Self::default()
        }
    }

    pub fn saved_records(&self) -> Option<&[Directory]> {
        self.records.as_deref()
    }
}

impl CacheStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Directory>> {
        if self.fail_loads {
            return Err(DirdexError::CacheUnreadable("injected load failure".into()));
        }
        self.records
            .clone()
            .ok_or_else(|| DirdexError::CacheUnreadable("no snapshot".into()))
    }

    fn load_metadata(&self) -> Result<CacheMetadata> {
        if self.fail_loads {
            return Err(DirdexError::CacheUnreadable("injected load failure".into()));
        }
        self.metadata
            .clone()
            .ok_or_else(|| DirdexError::CacheUnreadable("no metadata".into()))
    }

    fn save(&mut self, records: &[Directory]) -> Result<()> {
        self.save_calls += 1;
        if self.fail_saves {
            return Err(DirdexError::Persist("injected save failure".into()));
        }
        self.records = Some(records.to_vec());
        self.metadata = Some(CacheMetadata::stamped(records.len()));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.records = None;
        self.metadata = None;
        Ok(())
    }
}
