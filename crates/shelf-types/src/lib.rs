//! Foundation types for Shelf.
//!
//! This crate provides the value and naming types shared by every other
//! Shelf crate: the extractor produces them, the store holds them, and the
//! query filter compares against them.
//!
//! # Key Types
//!
//! - [`AttrValue`]: Tagged attribute value (integer, float, text, flag)
//! - [`Attributes`]: Ordered mapping of attribute name to value
//! - [`ObjectName`]: Validated record name with suffix lookup

pub mod error;
pub mod name;
pub mod value;

pub use error::TypeError;
pub use name::{suffix_of, ObjectName};
pub use value::{keys, AttrValue, Attributes};
