//! Short code generation for the hexhop URL shortener.
//!
//! This crate provides the [`Generator`] trait and its digest-based
//! implementation, [`Sha256Generator`]. Generation is deterministic per
//! URL and store state: unlike random or sequence-based generators, a
//! generator here consults the live store to resolve collisions and to
//! re-use the code already assigned to a resubmitted URL.

pub mod digest;

use async_trait::async_trait;
use hexhop_core::{CodeLookup, ShortCode, StorageError};
use thiserror::Error;

pub use digest::Sha256Generator;

#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// Every candidate block of the digest is bound to a different URL.
    /// The caller must treat the write as failed; no code is stored.
    #[error("all candidate blocks are bound to other urls")]
    Exhausted,
    /// The store could not be consulted during generation.
    #[error("lookup failed during generation: {0}")]
    Lookup(#[from] StorageError),
}

/// Trait for deriving short codes.
///
/// Implementations take the original URL and a lookup over existing
/// `code -> url` pairs, and must guarantee that two different URLs never
/// resolve to the same code within the consulted store, and that the
/// same URL resolves to the code it was first assigned.
#[async_trait]
pub trait Generator: Send + Sync + 'static {
    /// Derives a short code for `url`, consulting `lookup` for
    /// collisions.
    async fn generate(
        &self,
        url: &str,
        lookup: &dyn CodeLookup,
    ) -> Result<ShortCode, GenerateError>;
}
