use crate::artifacts::stat::file_stat::{FileStat, PathMetadata};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Working tree the entry names of an index are resolved against
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Entry names are raw bytes; they are never decoded as UTF-8.
    ///
    /// An empty name does not name anything, not even the workspace root.
    pub fn resolve(&self, name: &[u8]) -> std::io::Result<PathBuf> {
        if name.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "empty entry name",
            ));
        }

        Ok(self.path.join(OsStr::from_bytes(name)))
    }
}

impl PathMetadata for Workspace {
    fn lstat(&self, name: &[u8]) -> std::io::Result<FileStat> {
        let metadata = std::fs::symlink_metadata(self.resolve(name)?)?;

        Ok(FileStat::from(&metadata))
    }

    fn stat(&self, name: &[u8]) -> std::io::Result<FileStat> {
        let metadata = std::fs::metadata(self.resolve(name)?)?;

        Ok(FileStat::from(&metadata))
    }
}
