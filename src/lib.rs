//! UnifiedDB Index: mirror a directory tree as one JSON reference document
//!
//! Directories become nested objects and YAML/JSON files become
//! `{"$ref": "<path relative to the root>"}` leaves. Sibling entries are
//! inspected concurrently and each directory's batch fails as a whole.

pub mod config;
pub mod error;
pub mod logging;
pub mod tooling;
pub mod tree;

pub use error::IndexError;
pub use tree::{index, IndexEntry, IndexNode, PathSegments, Reference, TreeIndexer};
