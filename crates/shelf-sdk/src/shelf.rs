use std::sync::Arc;

use bytes::Bytes;
use shelf_query::Query;
use shelf_store::{InMemoryObjectStore, ObjectStore, StoreError, StoredRecord};
use shelf_types::{Attributes, ObjectName};
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};

/// Outcome of a successful [`Shelf::submit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Submitted {
    pub name: ObjectName,
    pub size: u64,
    pub attributes: Attributes,
}

/// The file repository.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and the
/// backing store does its own locking.
pub struct Shelf {
    store: Arc<dyn ObjectStore>,
}

impl Shelf {
    /// A repository backed by a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryObjectStore::new()))
    }

    /// A repository over an existing store.
    pub fn with_store(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    // ---- Write path ----

    /// Store a new file under `name`.
    ///
    /// Attributes are extracted before the store lock is taken. A name that
    /// is already in use yields [`SdkError::NameConflict`] and leaves the
    /// existing record untouched.
    pub fn submit(&self, name: &str, body: impl Into<Bytes>) -> SdkResult<Submitted> {
        let name = ObjectName::new(name)?;
        if self.store.contains(name.as_str())? {
            return Err(SdkError::NameConflict(name.into_string()));
        }

        let payload: Bytes = body.into();
        let attributes = shelf_meta::extract(name.as_str(), &payload);
        let record = StoredRecord::new(name.as_str(), attributes.clone(), payload);
        let size = record.size();

        self.store.insert(record).map_err(|err| match err {
            StoreError::AlreadyExists(name) => SdkError::NameConflict(name),
            other => SdkError::Store(other),
        })?;
        info!(name = %name, size, attributes = attributes.len(), "file stored");

        Ok(Submitted {
            name,
            size,
            attributes,
        })
    }

    // ---- Read path ----

    /// Payload of the single record matching `query`.
    pub fn resolve_download(&self, query: &Query) -> SdkResult<Bytes> {
        let names = shelf_query::filter(self.store.as_ref(), query)?;
        let name = match names.as_slice() {
            [] => return Err(SdkError::EmptySelection),
            [name] => name,
            _ => return Err(SdkError::AmbiguousSelection(names.len())),
        };
        let record = self.store.get(name)?.ok_or(SdkError::EmptySelection)?;
        debug!(name = %name, size = record.size(), "download resolved");
        Ok(record.payload)
    }

    /// Names of the records matching `query`.
    pub fn resolve_list(&self, query: &Query) -> SdkResult<Vec<String>> {
        Ok(shelf_query::filter(self.store.as_ref(), query)?)
    }

    /// Name and attributes of each record matching `query`.
    ///
    /// A `name` clause selects at most one record, which is looked up
    /// directly instead of scanning the store.
    pub fn resolve_info(&self, query: &Query) -> SdkResult<Vec<(String, Attributes)>> {
        let Some(name) = query.name() else {
            return Ok(shelf_query::select(self.store.as_ref(), query)?);
        };
        Ok(self
            .info(name)?
            .filter(|attrs| query.matches(name, attrs))
            .map(|attrs| vec![(name.to_string(), attrs)])
            .unwrap_or_default())
    }

    /// Attributes of one record, without its payload.
    pub fn info(&self, name: &str) -> SdkResult<Option<Attributes>> {
        Ok(self.store.attributes(name)?)
    }

    /// Number of stored files.
    pub fn len(&self) -> SdkResult<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> SdkResult<bool> {
        Ok(self.store.is_empty()?)
    }
}

impl Default for Shelf {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shelf")
            .field("files", &self.store.len().unwrap_or_default())
            .finish()
    }
}
