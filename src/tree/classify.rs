//! Entry classification: file, directory or neither, and extension matching

use std::fs::Metadata;
use std::path::Path;

/// Kind of a directory entry as reported by a single status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, FIFOs, devices, and symlinks when links are not followed.
    Other,
}

impl EntryKind {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }
}

/// Name without its extension when the extension is one of `extensions`.
///
/// Extensions are compared with their leading dot and are case-sensitive.
/// Names without an extension, dotfiles like `.json` included, never match.
pub fn indexable_stem<'a, S: AsRef<str>>(name: &'a str, extensions: &[S]) -> Option<&'a str> {
    let path = Path::new(name);
    let extension = path.extension()?.to_str()?;
    let stem = path.file_stem()?.to_str()?;
    extensions
        .iter()
        .any(|allowed| {
            allowed
                .as_ref()
                .strip_prefix('.')
                .is_some_and(|bare| bare == extension)
        })
        .then_some(stem)
}
