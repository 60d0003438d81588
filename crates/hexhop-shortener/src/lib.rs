//! Shortening service for hexhop.
//!
//! Composes a code generator with the authoritative store: a write
//! derives a code (consulting the store for collisions) and persists
//! the pair; a read resolves a code back to its original URL.

pub mod error;
pub mod service;

pub use error::ShortenError;
pub use service::{Shortener, ShortenerService};
