//! Local cache store adapters.
//!
//! `FileCacheStore` survives restarts; `MemoryCacheStore` is for tests and
//! embedding.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCacheStore;
pub use memory_store::MemoryCacheStore;
