use index_stat::artifacts::index::builder::IndexBuilder;
use index_stat::artifacts::index::entry_cursor::Entries;
use index_stat::artifacts::index::index_header::IndexHeader;
use index_stat::artifacts::index::stat_data::{CacheTime, StatSnapshot};
use index_stat::artifacts::stat::file_stat::FileStat;
use sha1::{Digest, Sha1};
use std::path::Path;

/// Stat data that no real file will ever report
pub fn stale_snapshot() -> StatSnapshot {
    StatSnapshot {
        ctime: CacheTime::new(1_000_000_000, 111),
        mtime: CacheTime::new(1_000_000_001, 222),
        dev: 0xdead,
        ino: 0xbeef,
        mode: 0o100755,
        uid: 4242,
        gid: 4343,
        size: 123_456,
    }
}

pub fn lstat_snapshot(path: &Path) -> StatSnapshot {
    FileStat::from(&std::fs::symlink_metadata(path).expect("Failed to lstat")).snapshot
}

pub fn stat_snapshot(path: &Path) -> StatSnapshot {
    FileStat::from(&std::fs::metadata(path).expect("Failed to stat")).snapshot
}

/// Index files built through the library, with the SHA-1 of each name as its object ID
#[derive(Debug, Clone, Default)]
pub struct IndexSpec {
    builder: IndexBuilder,
}

impl IndexSpec {
    pub fn version(self, version: u32) -> Self {
        IndexSpec {
            builder: self.builder.version(version),
        }
    }

    pub fn entry(self, name: &str, stat: StatSnapshot) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(name);
        let oid = hasher.finalize().into();

        IndexSpec {
            builder: self.builder.entry(name.as_bytes(), oid, stat),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        self.builder.build()
    }

    pub fn write(&self, path: &Path) -> Vec<u8> {
        let bytes = self.build();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create index directory");
        }
        std::fs::write(path, &bytes).expect("Failed to write index");
        bytes
    }
}

/// Decoded `(name, stat, oid)` of every entry in an index file.
pub fn read_entries(bytes: &[u8]) -> Vec<(String, StatSnapshot, [u8; 20])> {
    let header = IndexHeader::parse(bytes).expect("Invalid index header");

    Entries::new(bytes, header.entries_count)
        .map(|entry| {
            let (_, entry) = entry.expect("Invalid index entry");
            (
                String::from_utf8_lossy(entry.name).into_owned(),
                entry.stat,
                *entry.oid,
            )
        })
        .collect()
}
