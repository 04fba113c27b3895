use shelf_types::Attributes;

use crate::error::StoreResult;
use crate::record::StoredRecord;

/// Name-keyed object store.
///
/// All implementations must satisfy these invariants:
/// - Names are unique. `insert` never overwrites an existing record.
/// - `insert` is atomic with respect to every read: a reader sees either
///   no record for the name or the complete record.
/// - Records are immutable once inserted. There is no update or delete.
/// - Iteration order is backend-defined; callers needing a specific order
///   must sort.
pub trait ObjectStore: Send + Sync {
    /// Insert a new record.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` if the name is taken, in
    /// which case the store is unchanged.
    fn insert(&self, record: StoredRecord) -> StoreResult<()>;

    /// Read a record by name. Returns `Ok(None)` if it does not exist.
    fn get(&self, name: &str) -> StoreResult<Option<StoredRecord>>;

    /// Check whether a name is in use.
    fn contains(&self, name: &str) -> StoreResult<bool>;

    /// Number of stored records.
    fn len(&self) -> StoreResult<usize>;

    /// Visit every `(name, attributes)` pair without copying.
    ///
    /// The visitor runs while the backend holds its read lock, so it must
    /// not call back into the store.
    fn scan(&self, visit: &mut dyn FnMut(&str, &Attributes)) -> StoreResult<()>;

    /// Read only the attributes of a record.
    ///
    /// Default implementation goes through `get()`. Backends may override
    /// to avoid touching the payload.
    fn attributes(&self, name: &str) -> StoreResult<Option<Attributes>> {
        Ok(self.get(name)?.map(|record| record.attributes))
    }

    /// Collect every `(name, attributes)` pair in backend order.
    fn enumerate(&self) -> StoreResult<Vec<(String, Attributes)>> {
        let mut entries = Vec::new();
        self.scan(&mut |name, attrs| entries.push((name.to_string(), attrs.clone())))?;
        Ok(entries)
    }

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
