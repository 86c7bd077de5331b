//! Integration tests for the UnifiedDB tree indexer

mod tree_index;
mod tree_properties;
