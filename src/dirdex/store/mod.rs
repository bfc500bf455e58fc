//! # Persisted Cache Store
//!
//! Storage abstraction for the on-disk directory snapshot. The
//! [`CacheStore`] trait keeps the fetch orchestrator (`cache.rs`) testable
//! without a filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage under the configured cache
//!   directory:
//!   ```text
//!   cache/
//!   ├── directories.json    # the full record collection, pretty-printed
//!   └── metadata.json       # { last_updated, version, count }
//!   ```
//! - [`memory::InMemoryStore`]: in-memory storage for tests, with failure
//!   injection so orchestrator fallback paths can be exercised.
//!
//! ## Write discipline
//!
//! `save` stages both artifacts as temporary files and renames them into
//! place, collection first, metadata second. A crash can therefore leave a
//! collection newer than its metadata but never a torn file; the freshness
//! check treats the mismatch as expired and simply refetches.
//!
//! The store is intentionally dumb: no in-memory caching, no freshness
//! opinion. Every call touches persisted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Directory;

pub mod fs;
pub mod memory;

/// Schema tag written into `metadata.json`. Bump when the persisted record
/// shape changes incompatibly.
pub const CACHE_VERSION: &str = "1.0";

/// Freshness bookkeeping persisted next to the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub last_updated: DateTime<Utc>,
    pub version: String,
    pub count: usize,
}

impl CacheMetadata {
    pub fn stamped(count: usize) -> Self {
        Self {
            last_updated: Utc::now(),
            version: CACHE_VERSION.to_string(),
            count,
        }
    }
}

/// Abstract interface for the persisted snapshot.
///
/// Load failures of any kind (missing file, unreadable, corrupt JSON) map
/// to `DirdexError::CacheUnreadable` so callers can treat them uniformly
/// as "no usable cache". A load never returns a partial collection.
pub trait CacheStore {
    /// Deserialize the full record collection.
    fn load(&self) -> Result<Vec<Directory>>;

    /// Deserialize the freshness metadata (independent artifact).
    fn load_metadata(&self) -> Result<CacheMetadata>;

    /// Persist the collection, then stamp metadata with the current time
    /// and the collection's length.
    fn save(&mut self, records: &[Directory]) -> Result<()>;

    /// Remove both artifacts. Absence of either is not an error.
    fn clear(&mut self) -> Result<()>;
}
