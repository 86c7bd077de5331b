//! Path segment list from the indexed root to the current directory

use std::path::{Path, PathBuf};

/// Separator used inside `$ref` paths regardless of platform.
pub const REFERENCE_SEPARATOR: &str = "/";

/// Ordered directory names from the root down to the current directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    /// The empty list, denoting the root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new list extended by one directory name.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    /// Absolute location of the directory: `root` joined with every segment in order.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.0
            .iter()
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }

    /// Root-relative reference path for a file inside this directory.
    pub fn reference_path(&self, file_name: &str) -> String {
        self.0
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(file_name))
            .collect::<Vec<_>>()
            .join(REFERENCE_SEPARATOR)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for PathSegments {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
