//! Reading file contents.

use std::path::Path;

use crate::{CoreError, CoreResult};

/// Supplies the text of a file to open.
pub trait FileReader {
    fn read(&self, path: &Path) -> CoreResult<String>;
}

/// Reads UTF-8 files from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, path: &Path) -> CoreResult<String> {
        std::fs::read_to_string(path).map_err(|source| CoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello").unwrap();

        assert_eq!(FsReader.read(&path).unwrap(), "hello");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = FsReader.read(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CoreError::Read { .. }));
    }
}
