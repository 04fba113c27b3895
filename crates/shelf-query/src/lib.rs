//! Query filtering for Shelf.
//!
//! Request parameters become a [`Query`]: an ordered list of [`Clause`]s
//! that a record must all satisfy. Numeric literals are validated when the
//! query is built, so a bad literal is reported before the store is read.
//!
//! # Clauses
//!
//! - `name=V` -- the record name equals `V`
//! - `minduration=V` -- the record has a `duration` of at least `V`
//! - `maxduration=V` -- the record has a `duration` of at most `V`
//! - `K=V` -- the record has attribute `K` and it equals `V`
//!
//! A clause on an attribute the record does not carry fails; it never
//! matches by default.

pub mod clause;
pub mod error;
pub mod filter;
pub mod query;

pub use clause::Clause;
pub use error::{QueryError, QueryResult};
pub use filter::{filter, select};
pub use query::Query;
