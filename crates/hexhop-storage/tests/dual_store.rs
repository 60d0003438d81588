use async_trait::async_trait;
use dashmap::DashMap;
use hexhop_core::{CodeLookup, DurableBackend, ShortCode, StorageError, UrlStore};
use hexhop_storage::DualStore;
use std::sync::Arc;
use std::time::Duration;

fn code(s: &str) -> ShortCode {
    ShortCode::new_unchecked(s)
}

/// Durable backend backed by a plain map, standing in for Postgres.
#[derive(Default)]
struct MemoryBackend {
    rows: DashMap<String, String>,
}

#[async_trait]
impl DurableBackend for MemoryBackend {
    async fn exec_put(&self, code: &ShortCode, url: &str) -> Result<(), StorageError> {
        // First binding wins, as with ON CONFLICT DO NOTHING.
        self.rows
            .entry(code.as_str().to_owned())
            .or_insert_with(|| url.to_owned());
        Ok(())
    }

    async fn query_get(&self, code: &str) -> Result<Option<String>, StorageError> {
        Ok(self.rows.get(code).map(|row| row.clone()))
    }
}

/// Durable backend that is permanently down.
struct UnavailableBackend;

#[async_trait]
impl DurableBackend for UnavailableBackend {
    async fn exec_put(&self, _code: &ShortCode, _url: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    async fn query_get(&self, _code: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}

/// Durable backend that never answers within the configured timeout.
struct StalledBackend;

#[async_trait]
impl DurableBackend for StalledBackend {
    async fn exec_put(&self, _code: &ShortCode, _url: &str) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    async fn query_get(&self, _code: &str) -> Result<Option<String>, StorageError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

#[tokio::test]
async fn volatile_only_round_trip() {
    let store = DualStore::volatile_only();
    assert!(!store.is_durable());

    store.put(&code("5bd48fa"), "http://example.com/a").await.unwrap();

    let url = store.get("5bd48fa").await.unwrap();
    assert_eq!(url.as_deref(), Some("http://example.com/a"));
    assert!(store.get("0000000").await.unwrap().is_none());
}

#[tokio::test]
async fn durable_mode_writes_to_both_backends() {
    let backend = Arc::new(MemoryBackend::default());
    let store = DualStore::with_durable(backend.clone(), Duration::from_secs(1));
    assert!(store.is_durable());

    store.put(&code("5bd48fa"), "http://example.com/a").await.unwrap();

    // The read path goes to the durable backend.
    let url = store.get("5bd48fa").await.unwrap();
    assert_eq!(url.as_deref(), Some("http://example.com/a"));
    assert_eq!(
        backend.rows.get("5bd48fa").as_deref().map(String::as_str),
        Some("http://example.com/a")
    );
}

#[tokio::test]
async fn durable_mode_read_bypasses_volatile() {
    let backend = Arc::new(MemoryBackend::default());
    let store = DualStore::with_durable(backend.clone(), Duration::from_secs(1));

    // Data written by a "prior process instance" exists only durably.
    backend
        .rows
        .insert("042d795".to_owned(), "http://example.com/b".to_owned());

    let url = store.get("042d795").await.unwrap();
    assert_eq!(url.as_deref(), Some("http://example.com/b"));

    // And it is invisible to generation-time lookup, which reads the
    // volatile table of the current process.
    assert!(store.url_for_code("042d795").await.unwrap().is_none());
}

#[tokio::test]
async fn write_survives_unavailable_durable_backend() {
    let store = DualStore::with_durable(Arc::new(UnavailableBackend), Duration::from_secs(1));

    // The write succeeds on the volatile path alone.
    store.put(&code("5bd48fa"), "http://example.com/a").await.unwrap();

    // But the durable read path has no row and no fallback: the
    // intentional inconsistency window.
    let err = store.get("5bd48fa").await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));

    // The current process still sees its own claim during generation.
    let claimed = store.url_for_code("5bd48fa").await.unwrap();
    assert_eq!(claimed.as_deref(), Some("http://example.com/a"));
}

#[tokio::test]
async fn write_absorbs_stalled_durable_backend() {
    let store = DualStore::with_durable(Arc::new(StalledBackend), Duration::from_millis(20));

    // A stalled mirror is bounded by the timeout and does not fail the
    // write.
    store.put(&code("5bd48fa"), "http://example.com/a").await.unwrap();
}

#[tokio::test]
async fn read_fails_on_stalled_durable_backend() {
    let store = DualStore::with_durable(Arc::new(StalledBackend), Duration::from_millis(20));

    let err = store.get("5bd48fa").await.unwrap_err();
    assert!(matches!(err, StorageError::Timeout(_)));
}

#[tokio::test]
async fn missing_code_is_none_in_durable_mode() {
    let store = DualStore::with_durable(Arc::new(MemoryBackend::default()), Duration::from_secs(1));

    assert!(store.get("e10afea").await.unwrap().is_none());
}
