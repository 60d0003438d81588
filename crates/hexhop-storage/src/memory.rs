use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hexhop_core::error::Result;
use hexhop_core::{CodeLookup, ShortCode, StorageError, UrlStore};

/// In-memory implementation of the volatile URL mapping.
///
/// DashMap's sharded locks make concurrent `put`/`get` safe without a
/// global lock: readers never observe a partially written entry, and
/// writes to different codes never contend. `put` claims a code through
/// the entry API, so two workers racing on the same colliding block
/// resolve to exactly one winner.
#[derive(Debug, Default)]
pub struct VolatileStore {
    entries: DashMap<String, String>,
}

impl VolatileStore {
    /// Creates an empty volatile store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of codes currently bound.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl UrlStore for VolatileStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        match self.entries.entry(code.as_str().to_owned()) {
            Entry::Vacant(vacant) => {
                vacant.insert(url.to_owned());
                Ok(())
            }
            // Resubmitting the same pair is a no-op; a code is never
            // re-bound to a different url.
            Entry::Occupied(occupied) if occupied.get().as_str() == url => Ok(()),
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
        }
    }

    async fn get(&self, code: &str) -> Result<Option<String>> {
        Ok(self.entries.get(code).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl CodeLookup for VolatileStore {
    async fn url_for_code(&self, code: &str) -> Result<Option<String>> {
        Ok(self.entries.get(code).map(|entry| entry.clone()))
    }
}
