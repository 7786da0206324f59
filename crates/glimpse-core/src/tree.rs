//! File tree enumeration for an opened folder.

use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// Type of file tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// A node in the file tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// File/directory name
    pub name: String,

    /// Full path
    pub path: PathBuf,

    /// Path relative to the opened folder
    pub relative_path: PathBuf,

    /// Node type
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Child nodes (directories only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Returns true if this is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Returns true if this is a file.
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Returns the children, empty for files.
    pub fn children(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first search for a node by full path.
    pub fn find<'a>(nodes: &'a [FileNode], path: &Path) -> Option<&'a FileNode> {
        for node in nodes {
            if node.path == path {
                return Some(node);
            }
            if path.starts_with(&node.path) {
                if let Some(found) = Self::find(node.children(), path) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Enumerates `root` recursively.
///
/// Directories come before files and each group is sorted by name. Entries
/// whose name is in `exclude` are skipped. A subdirectory that cannot be read
/// is kept with no children instead of failing the scan; only an unreadable
/// root is an error.
pub fn build_tree(root: &Path, exclude: &[String]) -> CoreResult<Vec<FileNode>> {
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root.to_path_buf()));
    }
    let entries = std::fs::read_dir(root)?;
    Ok(build_children(entries, Path::new(""), exclude))
}

fn build_children(
    entries: std::fs::ReadDir,
    relative: &Path,
    exclude: &[String],
) -> Vec<FileNode> {
    let mut nodes = Vec::new();

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if exclude.iter().any(|e| *e == name) {
            continue;
        }

        let path = entry.path();
        let relative_path = relative.join(&name);
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            let children = match std::fs::read_dir(&path) {
                Ok(sub) => build_children(sub, &relative_path, exclude),
                Err(err) => {
                    tracing::warn!("Error reading directory {}: {}", path.display(), err);
                    Vec::new()
                }
            };
            nodes.push(FileNode {
                name,
                path,
                relative_path,
                kind: NodeKind::Directory,
                children: Some(children),
            });
        } else {
            nodes.push(FileNode {
                name,
                path,
                relative_path,
                kind: NodeKind::File,
                children: None,
            });
        }
    }

    // Sort: directories first, then alphabetically
    nodes.sort_by(|a, b| match (a.kind, b.kind) {
        (NodeKind::Directory, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(nodes: &[FileNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_directories_first_then_alphabetical() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();

        let tree = build_tree(dir.path(), &[]).unwrap();
        assert_eq!(names(&tree), vec!["alpha", "zeta", "a.txt", "b.txt"]);
        assert!(tree[0].is_directory());
        assert!(tree[2].is_file());
    }

    #[test]
    fn test_nested_relative_paths() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();

        let tree = build_tree(dir.path(), &[]).unwrap();
        let main = &tree[0].children()[0];
        assert_eq!(main.name, "main.rs");
        assert_eq!(main.relative_path, PathBuf::from("src/main.rs"));
        assert_eq!(main.path, dir.path().join("src/main.rs"));

        let found = FileNode::find(&tree, &dir.path().join("src/main.rs")).unwrap();
        assert_eq!(found.name, "main.rs");
    }

    #[test]
    fn test_excluded_names_skipped() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::create_dir(dir.path().join("__pycache__")).unwrap();
        std::fs::write(dir.path().join("index.js"), "").unwrap();

        let exclude = vec!["node_modules".to_string(), "__pycache__".to_string()];
        let tree = build_tree(dir.path(), &exclude).unwrap();
        assert_eq!(names(&tree), vec!["index.js"]);
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "").unwrap();

        assert!(matches!(
            build_tree(&file, &[]),
            Err(CoreError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();

        let tree = build_tree(dir.path(), &[]).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["type"], "directory");
        assert_eq!(json[0]["relativePath"], "docs");
        assert!(json[0]["children"].is_array());
        assert_eq!(json[1]["type"], "file");
        assert!(json[1].get("children").is_none());
    }
}
