//! Tree Indexer
//!
//! Walks a directory tree and mirrors it as an [`IndexNode`]: directories become
//! nested nodes and YAML/JSON files become `{"$ref": "<relative path>"}` leaves.

pub mod classify;
pub mod fs;
pub mod indexer;
pub mod node;
pub mod segments;

pub use classify::{indexable_stem, EntryKind};
pub use fs::{IndexFs, TokioFs};
pub use indexer::{index, TreeIndexer};
pub use node::{IndexEntry, IndexNode, Reference};
pub use segments::PathSegments;
