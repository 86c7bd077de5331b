//! Tooling & Integration Layer
//!
//! Command-line entry point for indexing a UnifiedDB architecture folder.

pub mod cli;

pub use cli::{Cli, CliContext, USAGE};
