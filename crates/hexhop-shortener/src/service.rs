use crate::error::ShortenError;
use async_trait::async_trait;
use hexhop_core::{CodeLookup, ShortCode, UrlStore};
use hexhop_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info};

/// The contract the transport layer consumes.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Derives a code for `url` and persists the pair.
    ///
    /// Resubmitting the same URL returns the code it was first
    /// assigned.
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenError>;

    /// Resolves a raw code to its original URL.
    /// Returns `None` for unknown codes.
    async fn resolve(&self, code: &str) -> Result<Option<String>, ShortenError>;
}

/// A concrete [`Shortener`] over a store and a generator.
///
/// The store doubles as the collision-lookup capability during
/// generation, so a write is: generate against the live store, then
/// put.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> ShortenerService<S, G>
where
    S: UrlStore + CodeLookup,
    G: Generator,
{
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
        }
    }
}

#[async_trait]
impl<S, G> Shortener for ShortenerService<S, G>
where
    S: UrlStore + CodeLookup,
    G: Generator,
{
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenError> {
        let code = self
            .generator
            .generate(url, self.store.as_ref() as &dyn CodeLookup)
            .await?;

        self.store.put(&code, url).await?;

        info!(code = %code, "shortened url");
        Ok(code)
    }

    async fn resolve(&self, code: &str) -> Result<Option<String>, ShortenError> {
        let url = self.store.get(code).await?;
        debug!(code = %code, found = url.is_some(), "resolved code");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexhop_generator::Sha256Generator;
    use hexhop_storage::VolatileStore;
    use std::collections::HashSet;

    fn test_service() -> ShortenerService<VolatileStore, Sha256Generator> {
        ShortenerService::new(VolatileStore::new(), Sha256Generator::new())
    }

    #[tokio::test]
    async fn shorten_then_resolve_round_trip() {
        let service = test_service();

        let code = service.shorten("http://example.com/a").await.unwrap();
        // First block of sha256("http://example.com/a"), hex-encoded.
        assert_eq!(code.as_str(), "5bd48fa");

        let url = service.resolve(code.as_str()).await.unwrap();
        assert_eq!(url.as_deref(), Some("http://example.com/a"));
    }

    #[tokio::test]
    async fn resolve_unknown_code() {
        let service = test_service();

        let url = service.resolve("0000000").await.unwrap();
        assert!(url.is_none());
    }

    #[tokio::test]
    async fn resubmission_is_idempotent() {
        let service = test_service();

        let first = service.shorten("http://example.com/a").await.unwrap();
        let second = service.shorten("http://example.com/a").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn distinct_urls_never_share_a_code() {
        let service = test_service();
        let mut codes = HashSet::new();

        for i in 0..50 {
            let code = service
                .shorten(&format!("http://example.com/page/{i}"))
                .await
                .unwrap();
            assert!(codes.insert(code));
        }

        assert_eq!(codes.len(), 50);
    }

    #[tokio::test]
    async fn concurrent_shortens_of_distinct_urls() {
        let service = Arc::new(test_service());
        let mut handles = vec![];

        for i in 0..32u64 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .shorten(&format!("http://example.com/{i}"))
                    .await
                    .unwrap()
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            assert!(codes.insert(handle.await.unwrap()));
        }
        assert_eq!(codes.len(), 32);

        // No lost updates: every code still resolves to its url.
        for code in &codes {
            assert!(service.resolve(code.as_str()).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn concurrent_resubmissions_of_the_same_url() {
        let service = Arc::new(test_service());
        let mut handles = vec![];

        for _ in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(
                async move { service.shorten("http://example.com/a").await },
            ));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            // A racer may lose the claim to a sibling binding the same
            // url, which the store treats as an idempotent re-put; all
            // requests succeed with the same code.
            codes.insert(handle.await.unwrap().unwrap());
        }
        assert_eq!(codes.len(), 1);
    }
}
