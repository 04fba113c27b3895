//! Run a [`Query`] over a store.
//!
//! Both entry points make one pass over the store's enumeration and keep
//! its order. Records are evaluated under the store's read lock, so a
//! concurrent insert is either fully visible to a pass or not at all.

use shelf_store::ObjectStore;
use shelf_types::Attributes;
use tracing::debug;

use crate::error::QueryResult;
use crate::query::Query;

/// Names of the records matching `query`, in store order.
pub fn filter<S>(store: &S, query: &Query) -> QueryResult<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let mut names = Vec::new();
    store.scan(&mut |name, attrs| {
        if query.matches(name, attrs) {
            names.push(name.to_string());
        }
    })?;
    debug!(query = %query, matched = names.len(), "filter pass");
    Ok(names)
}

/// Names and attributes of the records matching `query`, in store order.
pub fn select<S>(store: &S, query: &Query) -> QueryResult<Vec<(String, Attributes)>>
where
    S: ObjectStore + ?Sized,
{
    let mut entries = Vec::new();
    store.scan(&mut |name, attrs| {
        if query.matches(name, attrs) {
            entries.push((name.to_string(), attrs.clone()));
        }
    })?;
    debug!(query = %query, matched = entries.len(), "select pass");
    Ok(entries)
}
