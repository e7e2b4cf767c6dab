//! Metadata-provider lookup cache.

use crate::error::{ErrorKind, Result};
use crate::models::Enrichment;
use exn::ResultExt;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument};

/// In-memory read side of the metadata provider's lookup cache.
///
/// The fetch step (outside this crate) talks to the provider and writes its
/// responses to a single JSON file, one record per multiverse id. This type
/// loads that file once and answers lookups for the rest of the run. It is
/// owned by whoever constructs the registry and passed by reference; there
/// is no process-wide singleton, so two runs never share cache state.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentCache {
    records: HashMap<u64, Enrichment>,
}

impl EnrichmentCache {
    /// A cache with no records; every lookup misses. Registry construction
    /// works fine against this, all printings just take the fallback
    /// clustering path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cache from already-fetched records.
    pub fn from_records(records: impl IntoIterator<Item = (u64, Enrichment)>) -> Self {
        Self { records: records.into_iter().collect() }
    }

    /// Loads the provider cache file: a JSON object mapping multiverse id
    /// to provider record.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ProviderCache`] if the file cannot be read or
    /// parsed. A *missing* cache is expected during early runs; callers
    /// that treat it as optional should check for existence and fall back
    /// to [`empty`](Self::empty) themselves.
    #[instrument]
    pub fn from_path(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).or_raise(|| ErrorKind::ProviderCache(path.to_path_buf()))?;
        let records: HashMap<u64, Enrichment> =
            serde_json::from_slice(&bytes).or_raise(|| ErrorKind::ProviderCache(path.to_path_buf()))?;
        info!(records = records.len(), "loaded provider cache");
        Ok(Self { records })
    }

    /// Looks up the provider record for a multiverse id.
    pub fn get(&self, multiverse_id: u64) -> Option<&Enrichment> {
        self.records.get(&multiverse_id)
    }

    /// Number of cached provider records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_cache_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "94": {{ "oracle_id": "K1", "set_code": "lea", "released_at": "1993-08-05" }},
                "25871": {{ "oracle_id": "K1", "set_code": "7ed" }}
            }}"#
        )
        .unwrap();

        let cache = EnrichmentCache::from_path(file.path()).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(94).and_then(|e| e.oracle_id.as_deref()), Some("K1"));
        assert!(cache.get(94).unwrap().released.is_some());
        assert!(cache.get(25871).unwrap().released.is_none());
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EnrichmentCache::from_path(dir.path().join("nope.json"));
        assert!(matches!(*result.unwrap_err(), ErrorKind::ProviderCache(_)));
    }

    #[test]
    fn empty_cache_misses_everything() {
        let cache = EnrichmentCache::empty();
        assert!(cache.is_empty());
        assert!(cache.get(94).is_none());
    }
}
