use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::map::Entry;
use indexmap::IndexMap;
use shelf_types::Attributes;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::StoredRecord;
use crate::traits::ObjectStore;

/// In-memory, insertion-ordered object store.
///
/// Records live in an `IndexMap` behind a `RwLock`: reads share the lock,
/// `insert` takes it exclusively for the map insertion only. Enumeration
/// yields records in the order they were inserted. Contents are lost when
/// the process exits.
pub struct InMemoryObjectStore {
    records: RwLock<IndexMap<String, StoredRecord>>,
}

impl InMemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, IndexMap<String, StoredRecord>>> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, IndexMap<String, StoredRecord>>> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn insert(&self, record: StoredRecord) -> StoreResult<()> {
        let mut map = self.write()?;
        match map.entry(record.name.clone()) {
            Entry::Occupied(entry) => Err(StoreError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(name = %record.name, size = record.size(), "record inserted");
                entry.insert(record);
                Ok(())
            }
        }
    }

    fn get(&self, name: &str) -> StoreResult<Option<StoredRecord>> {
        Ok(self.read()?.get(name).cloned())
    }

    fn contains(&self, name: &str) -> StoreResult<bool> {
        Ok(self.read()?.contains_key(name))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    fn scan(&self, visit: &mut dyn FnMut(&str, &Attributes)) -> StoreResult<()> {
        let map = self.read()?;
        for (name, record) in map.iter() {
            visit(name, &record.attributes);
        }
        Ok(())
    }

    fn attributes(&self, name: &str) -> StoreResult<Option<Attributes>> {
        Ok(self.read()?.get(name).map(|record| record.attributes.clone()))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryObjectStore")
            .field("record_count", &count)
            .finish()
    }
}
