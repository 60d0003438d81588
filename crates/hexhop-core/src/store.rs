use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Lookup capability over existing `code -> url` pairs.
///
/// The code generator consults this while stepping through candidate
/// blocks, so implementations must reflect every code claimed by the
/// current process, including writes still in flight to a durable
/// backend.
#[async_trait]
pub trait CodeLookup: Send + Sync {
    /// Returns the URL bound to `code`, or `None` if the code is unused.
    async fn url_for_code(&self, code: &str) -> Result<Option<String>>;
}

/// The authoritative mapping of short codes to original URLs.
///
/// Entries are created by [`put`](UrlStore::put) and never mutated or
/// deleted; a code's bound URL is immutable once set.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Binds `code` to `url`.
    ///
    /// Re-binding the same pair is a no-op; binding an already-used
    /// code to a different URL fails with `Conflict`.
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()>;

    /// Resolves a raw code to its original URL.
    /// Returns `None` if the code has no binding.
    async fn get(&self, code: &str) -> Result<Option<String>>;
}

/// A durable key-value backend mirroring the volatile mapping.
///
/// Implementations own their connection and schema; the core never
/// constructs connection configuration. The backend is treated as an
/// externally synchronized resource and receives at most one statement
/// per call.
#[async_trait]
pub trait DurableBackend: Send + Sync + 'static {
    /// Persists a `code -> url` pair. Re-persisting the same pair must
    /// succeed without touching the existing row.
    async fn exec_put(&self, code: &ShortCode, url: &str) -> Result<()>;

    /// Fetches the URL bound to `code`, or `None` if unknown.
    async fn query_get(&self, code: &str) -> Result<Option<String>>;
}
