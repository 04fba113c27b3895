//! Name-keyed object storage for Shelf.
//!
//! Every uploaded file is stored as an immutable [`StoredRecord`]: its
//! unique name, the attributes derived from it at upload time, and the raw
//! payload. Records are created once and never updated or deleted.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `RwLock<IndexMap>` store, volatile
//!
//! # Design Rules
//!
//! 1. Names are unique. A second insert under the same name fails and
//!    leaves the first record untouched.
//! 2. Inserts are atomic: readers see a record fully or not at all.
//! 3. Attributes are stored apart from the payload so metadata queries
//!    never copy blobs.
//! 4. The store never interprets payloads; extraction happens before insert.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use record::StoredRecord;
pub use traits::ObjectStore;
