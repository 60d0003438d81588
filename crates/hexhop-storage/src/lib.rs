//! Storage backends for the hexhop URL shortener.
//!
//! The authoritative mapping is a [`DualStore`]: a volatile in-memory
//! table that every write lands in, optionally mirrored to a durable
//! key-value backend. Writes prefer availability (a failed durable
//! mirror is logged, not propagated); reads in durable mode go
//! exclusively to the durable backend so they reflect cross-process
//! state.

pub mod dual;
pub mod memory;
pub mod postgres;

pub use dual::{DualStore, DEFAULT_DURABLE_TIMEOUT};
pub use memory::VolatileStore;
pub use postgres::PostgresBackend;
