//! Platform path resolution for configuration files.

pub mod xdg_root;
