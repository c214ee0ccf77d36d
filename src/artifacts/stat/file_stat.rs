use crate::artifacts::index::stat_data::{CacheTime, StatSnapshot};
use derive_new::new;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileKind {
    #[default]
    Regular,
    Directory,
    Symlink,
    Other,
}

/// Filesystem metadata of a working tree path, already narrowed to index widths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct FileStat {
    pub snapshot: StatSnapshot,
    pub kind: FileKind,
}

impl FileStat {
    pub fn is_regular(&self) -> bool {
        self.kind == FileKind::Regular
    }
}

/// Looks up metadata for the raw path stored in an index entry.
pub trait PathMetadata {
    /// Metadata of the path itself; a symlink is reported as a symlink.
    fn lstat(&self, name: &[u8]) -> std::io::Result<FileStat>;

    /// Metadata of whatever the path ultimately points to.
    fn stat(&self, name: &[u8]) -> std::io::Result<FileStat>;
}

impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_file() {
            FileKind::Regular
        } else if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_symlink() {
            FileKind::Symlink
        } else {
            FileKind::Other
        };

        let snapshot = StatSnapshot {
            ctime: CacheTime::new(metadata.ctime() as u32, metadata.ctime_nsec() as u32),
            mtime: CacheTime::new(metadata.mtime() as u32, metadata.mtime_nsec() as u32),
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: metadata.mode(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        };

        FileStat::new(snapshot, kind)
    }
}
