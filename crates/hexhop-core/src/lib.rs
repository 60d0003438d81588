//! Core types and traits for the hexhop URL shortener.
//!
//! This crate provides the shared vocabulary used by the generator,
//! the storage layer, and the shortener service: the validated
//! [`ShortCode`] type, the error taxonomy, and the trait seams between
//! code generation, the authoritative store, and the durable backend.

pub mod error;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, StorageError};
pub use shortcode::ShortCode;
pub use store::{CodeLookup, DurableBackend, UrlStore};
