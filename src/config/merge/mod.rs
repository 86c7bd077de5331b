//! Source composition for configuration loading.

pub mod service;
