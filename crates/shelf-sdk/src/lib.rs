//! High-level API for Shelf.
//!
//! [`Shelf`] composes the extractor, the store, and the query filter into
//! the four operations a transport needs: submit a file, and resolve a
//! query into a payload, a name list, or per-name attributes.

pub mod error;
pub mod shelf;

pub use error::{SdkError, SdkResult};
pub use shelf::{Shelf, Submitted};

// Re-export key types
pub use bytes::Bytes;
pub use shelf_query::{Clause, Query, QueryError};
pub use shelf_store::{InMemoryObjectStore, ObjectStore, StoredRecord};
pub use shelf_types::{AttrValue, Attributes, ObjectName};
