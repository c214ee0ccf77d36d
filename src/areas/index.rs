//! Git index file on disk
//!
//! Hands out the whole index as one contiguous mutable buffer and writes it back
//! afterwards. Two strategies are available:
//!
//! - `Atomic`: the file is read into memory while `index.lock` is held, then the
//!   lockfile receives the new content and is renamed over the index. Readers only
//!   ever see the old or the new file. This is the same protocol git itself uses.
//! - `InPlace`: the file is mapped read-write under an exclusive advisory lock and
//!   patched where it lies. No copy is made, but an interrupted run leaves a
//!   partially patched index behind.

use crate::artifacts::index::error::{FormatError, IndexError, IndexResult};
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE};
use file_guard::FileGuard;
use memmap2::MmapMut;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Atomic,
    InPlace,
}

#[derive(Debug, Clone)]
pub struct IndexFile {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    mode: WriteMode,
}

impl IndexFile {
    pub fn new(path: Box<Path>, mode: WriteMode) -> Self {
        IndexFile { path, mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the index without taking any lock.
    pub fn read(&self) -> IndexResult<Vec<u8>> {
        std::fs::read(self.path()).map_err(IndexError::io(self.path()))
    }

    /// Get exclusive, writable access to the whole index.
    ///
    /// # Returns
    ///
    /// The buffer holding the whole file. Under `Atomic` it also holds `index.lock`,
    /// so opening fails with `Io` while another process owns that lock. Under
    /// `InPlace` a file too short for a header fails with `TruncatedHeader`.
    pub fn open(&self) -> IndexResult<IndexBuffer> {
        let backing = match self.mode {
            WriteMode::Atomic => {
                let lock = LockFile::acquire(self.path())?;
                let data = self.read()?;

                Backing::Staged { data, lock }
            }
            WriteMode::InPlace => self.map()?,
        };

        Ok(IndexBuffer {
            path: self.path.clone(),
            backing,
        })
    }

    fn map(&self) -> IndexResult<Backing> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(self.path())
            .map_err(IndexError::io(self.path()))?;
        let guard = file_guard::lock(Box::new(file), file_guard::Lock::Exclusive, 0, 1)
            .map_err(IndexError::io(self.path()))?;

        let len = guard
            .metadata()
            .map_err(IndexError::io(self.path()))?
            .len() as usize;
        if len < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(FormatError::TruncatedHeader { len }.into());
        }

        // SAFETY: the exclusive lock keeps cooperating writers away while mapped
        let map = unsafe { MmapMut::map_mut(&**guard) }.map_err(IndexError::io(self.path()))?;

        Ok(Backing::Mapped { map, _guard: guard })
    }
}

/// Writable bytes of a whole index file.
///
/// Changes reach the file only through [`IndexBuffer::persist`]; dropping the buffer
/// instead abandons them (for a mapped file, whatever was already written stays).
#[derive(Debug)]
pub struct IndexBuffer {
    path: Box<Path>,
    backing: Backing,
}

enum Backing {
    Mapped {
        map: MmapMut,
        _guard: FileGuard<Box<File>>,
    },
    Staged {
        data: Vec<u8>,
        lock: LockFile,
    },
}

impl std::fmt::Debug for Backing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backing::Mapped { map, .. } => f.debug_struct("Mapped").field("len", &map.len()).finish(),
            Backing::Staged { data, lock } => f
                .debug_struct("Staged")
                .field("len", &data.len())
                .field("lock", &lock.path)
                .finish(),
        }
    }
}

impl IndexBuffer {
    /// Write the buffer back to the index file
    ///
    /// # Returns
    ///
    /// `Io` if flushing the mapping, writing the lockfile or renaming it fails. A
    /// failed rename leaves the old index in place and removes the lockfile.
    pub fn persist(self) -> IndexResult<()> {
        match self.backing {
            Backing::Mapped { map, _guard } => map.flush().map_err(IndexError::io(&*self.path)),
            Backing::Staged { data, lock } => lock.commit(&data),
        }
    }
}

impl Deref for IndexBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped { map, .. } => &map[..],
            Backing::Staged { data, .. } => &data[..],
        }
    }
}

impl DerefMut for IndexBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        match &mut self.backing {
            Backing::Mapped { map, .. } => &mut map[..],
            Backing::Staged { data, .. } => &mut data[..],
        }
    }
}

/// `<index>.lock`, created exclusively and removed again unless committed
#[derive(Debug)]
struct LockFile {
    path: PathBuf,
    target: PathBuf,
    file: File,
    committed: bool,
}

impl LockFile {
    fn acquire(target: &Path) -> IndexResult<Self> {
        let mut path = target.as_os_str().to_owned();
        path.push(".lock");
        let path = PathBuf::from(path);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(IndexError::io(&path))?;

        Ok(LockFile {
            path,
            target: target.to_path_buf(),
            file,
            committed: false,
        })
    }

    fn commit(mut self, data: &[u8]) -> IndexResult<()> {
        self.file
            .write_all(data)
            .and_then(|_| self.file.sync_all())
            .map_err(IndexError::io(&self.path))?;
        std::fs::rename(&self.path, &self.target).map_err(IndexError::io(&self.target))?;
        self.committed = true;

        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
