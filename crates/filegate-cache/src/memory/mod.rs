//! In-process URL cache.

pub mod store;

pub use store::MemoryUrlCache;
