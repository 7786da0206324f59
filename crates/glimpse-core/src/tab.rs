//! Open-file tabs.
//!
//! A tab's `path` is its identity: it is the de-duplication key when a file
//! is opened twice and the key under which the file is watched. `TabId` is
//! only a stable handle for the display layer.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Unique handle for an open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    /// Creates a new unique tab ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a click on a file in the tree hands to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Display name
    pub name: String,
    /// Full path
    pub path: PathBuf,
}

impl FileDescriptor {
    /// Builds a descriptor whose name is the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// One open file.
#[derive(Debug, Clone)]
pub struct Tab {
    id: TabId,
    name: String,
    path: PathBuf,
    content: String,
}

impl Tab {
    pub(crate) fn new(descriptor: FileDescriptor, content: String) -> Self {
        Self {
            id: TabId::new(),
            name: descriptor.name,
            path: descriptor.path,
            content,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the text wholesale.
    pub(crate) fn replace_content(&mut self, content: String) {
        self.content = content;
    }

    /// Number of lines as shown in the gutter and status bar.
    ///
    /// Splits on `\n`, so a trailing newline yields a final empty line.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_path() {
        let desc = FileDescriptor::from_path("/work/src/main.rs");
        assert_eq!(desc.name, "main.rs");
        assert_eq!(desc.path, PathBuf::from("/work/src/main.rs"));
    }

    #[test]
    fn test_line_count() {
        let tab = Tab::new(FileDescriptor::from_path("/a.txt"), "one\ntwo\n".to_string());
        assert_eq!(tab.line_count(), 3);

        let empty = Tab::new(FileDescriptor::from_path("/b.txt"), String::new());
        assert_eq!(empty.line_count(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(TabId::new(), TabId::new());
    }
}
