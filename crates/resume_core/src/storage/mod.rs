//! Client-local persistence for résumé records.
//!
//! # Responsibility
//! - Define the key-value backend contract and its implementations.
//! - Provide the validated résumé record store on top of it.
//!
//! # Invariants
//! - The store handle is passed explicitly; there is no process-wide store.
//! - Only `ResumeStore` writes the résumé list key.

pub mod clock;
pub mod error;
pub mod kv;
pub mod memory;
pub mod resume_store;
pub mod sqlite;

pub use clock::{Clock, SystemClock};
pub use error::{StorageError, StorageErrorCode, StorageResult};
pub use kv::{KeyValueStore, KvError, KvResult, UnavailableStore};
pub use memory::MemoryStore;
pub use resume_store::ResumeStore;
pub use sqlite::SqliteKeyValueStore;
