use super::{CacheMetadata, CacheStore};
use crate::error::{DirdexError, Result};
use crate::model::Directory;
use std::fs;
use std::path::{Path, PathBuf};

const COLLECTION_FILE: &str = "directories.json";
const METADATA_FILE: &str = "metadata.json";

/// File-backed cache store.
///
/// Both artifacts live directly under `cache_dir`. Writes go through a
/// temporary file in the same directory followed by a rename, so readers
/// never observe a torn artifact even if the process dies mid-write.
pub struct FileStore {
    cache_dir: PathBuf,
}

impl FileStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn collection_path(&self) -> PathBuf {
        self.cache_dir.join(COLLECTION_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.cache_dir.join(METADATA_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).map_err(DirdexError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .map_err(|e| DirdexError::CacheUnreadable(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DirdexError::CacheUnreadable(format!("{}: {}", path.display(), e)))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("artifact");
        let tmp_path = self.cache_dir.join(format!(".{}.tmp", file_name));
        fs::write(&tmp_path, content).map_err(|e| DirdexError::Persist(e.to_string()))?;
        fs::rename(&tmp_path, path).map_err(|e| DirdexError::Persist(e.to_string()))?;
        Ok(())
    }

    fn remove_if_exists(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DirdexError::Io(e)),
        }
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<Vec<Directory>> {
        self.read_json(&self.collection_path())
    }

    fn load_metadata(&self) -> Result<CacheMetadata> {
        self.read_json(&self.metadata_path())
    }

    fn save(&mut self, records: &[Directory]) -> Result<()> {
        self.ensure_dir()?;

        let collection =
            serde_json::to_string_pretty(records).map_err(DirdexError::Serialization)?;
        let meta = CacheMetadata::stamped(records.len());
        let metadata = serde_json::to_string_pretty(&meta).map_err(DirdexError::Serialization)?;

        // Collection commits first. If the metadata rename never happens,
        // the stale metadata fails the freshness check and the next read
        // refetches, which is safe.
        self.write_atomic(&self.collection_path(), &collection)?;
        self.write_atomic(&self.metadata_path(), &metadata)?;

        tracing::debug!(count = records.len(), "cache saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Self::remove_if_exists(&self.collection_path())?;
        Self::remove_if_exists(&self.metadata_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(slug: &str) -> Directory {
        let now = Utc::now();
        Directory {
            id: format!("id-{}", slug),
            slug: slug.to_string(),
            name: slug.to_string(),
            url: format!("https://{}.example.com", slug),
            description: String::new(),
            categories: vec!["SaaS".to_string()],
            pricing: "free".to_string(),
            link_type: "dofollow".to_string(),
            domain_rating: 50,
            organic_traffic: 1000,
            organic_keywords: 200,
            helpful_count: 3,
            view_count: 40,
            submission_url: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        let records = vec![sample("one"), sample("two")];
        store.save(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);

        let meta = store.load_metadata().unwrap();
        assert_eq!(meta.count, 2);
        assert_eq!(meta.version, crate::store::CACHE_VERSION);
    }

    #[test]
    fn test_load_missing_is_cache_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));

        assert!(matches!(
            store.load(),
            Err(DirdexError::CacheUnreadable(_))
        ));
        assert!(matches!(
            store.load_metadata(),
            Err(DirdexError::CacheUnreadable(_))
        ));
    }

    #[test]
    fn test_load_corrupt_is_cache_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save(&[sample("one")]).unwrap();

        fs::write(store.collection_path(), "not json {").unwrap();
        assert!(matches!(
            store.load(),
            Err(DirdexError::CacheUnreadable(_))
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        store.save(&[sample("one")]).unwrap();
        store.clear().unwrap();
        assert!(!store.collection_path().exists());
        assert!(!store.metadata_path().exists());

        // Clearing an already-empty store succeeds too.
        store.clear().unwrap();
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save(&[sample("one")]).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
