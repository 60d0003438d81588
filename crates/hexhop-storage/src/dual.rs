use crate::memory::VolatileStore;
use async_trait::async_trait;
use hexhop_core::error::Result;
use hexhop_core::{CodeLookup, DurableBackend, ShortCode, StorageError, UrlStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default bound on a single durable backend call.
pub const DEFAULT_DURABLE_TIMEOUT: Duration = Duration::from_secs(3);

/// The authoritative store, routing between two backends.
///
/// Every write lands in the volatile table; when a durable backend is
/// configured, the write is also mirrored there on a best-effort basis.
/// A failed or timed-out mirror is logged and does not fail the write:
/// the service keeps answering requests even if the durable backend is
/// briefly unavailable, at the cost of an inconsistency window until
/// the next successful mirror of that code.
///
/// Reads route by mode: with a durable backend configured they go
/// exclusively to it, so they reflect data written by prior process
/// instances; without one they read the volatile table. There is no
/// fallback from a failed durable read.
///
/// Whether the store is durable is fixed at construction; it is never
/// re-decided per call.
pub struct DualStore {
    volatile: VolatileStore,
    durable: Option<Arc<dyn DurableBackend>>,
    durable_timeout: Duration,
}

impl DualStore {
    /// Creates a store that keeps all data in memory only.
    pub fn volatile_only() -> Self {
        Self {
            volatile: VolatileStore::new(),
            durable: None,
            durable_timeout: DEFAULT_DURABLE_TIMEOUT,
        }
    }

    /// Creates a store mirrored to a durable backend, with each backend
    /// call bounded by `durable_timeout`.
    pub fn with_durable(backend: Arc<dyn DurableBackend>, durable_timeout: Duration) -> Self {
        Self {
            volatile: VolatileStore::new(),
            durable: Some(backend),
            durable_timeout,
        }
    }

    /// Whether reads are served from the durable backend.
    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    /// Best-effort mirror of a freshly written pair.
    async fn mirror(&self, backend: &Arc<dyn DurableBackend>, code: &ShortCode, url: &str) {
        match timeout(self.durable_timeout, backend.exec_put(code, url)).await {
            Ok(Ok(())) => {
                debug!(code = %code, "mirrored write to durable backend");
            }
            Ok(Err(error)) => {
                warn!(code = %code, error = %error, "durable write failed, volatile write kept");
            }
            Err(_) => {
                warn!(
                    code = %code,
                    timeout_ms = self.durable_timeout.as_millis() as u64,
                    "durable write timed out, volatile write kept"
                );
            }
        }
    }
}

#[async_trait]
impl UrlStore for DualStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        self.volatile.put(code, url).await?;

        if let Some(backend) = &self.durable {
            self.mirror(backend, code, url).await;
        }

        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<String>> {
        match &self.durable {
            Some(backend) => timeout(self.durable_timeout, backend.query_get(code))
                .await
                .map_err(|_| {
                    StorageError::Timeout(format!("durable read for code '{code}' timed out"))
                })?,
            None => self.volatile.get(code).await,
        }
    }
}

#[async_trait]
impl CodeLookup for DualStore {
    // Generation always consults the volatile table: it is the source
    // of truth for codes claimed by the current process, including
    // writes whose durable mirror failed or is still in flight.
    async fn url_for_code(&self, code: &str) -> Result<Option<String>> {
        self.volatile.url_for_code(code).await
    }
}
