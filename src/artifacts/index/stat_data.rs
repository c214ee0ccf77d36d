//! Cached `stat(2)` data embedded at the start of every index entry
//!
//! The snapshot is 40 bytes: two timestamps (seconds + nanoseconds each) followed by
//! device, inode, mode, uid, gid and size, all as 32-bit big-endian words. Values
//! wider than 32 bits are truncated, exactly as git does when it writes the index.

use byteorder::{ByteOrder, NetworkEndian};
use derive_new::new;

/// Size of the stat data block in bytes
pub const STAT_DATA_SIZE: usize = 40;

const STAT_DATA_WORDS: usize = STAT_DATA_SIZE / 4;

/// Timestamp as stored in the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct CacheTime {
    /// Seconds since Unix epoch
    pub sec: u32,
    /// Nanoseconds within the second
    pub nsec: u32,
}

/// Stat data cached for a single index entry
///
/// ## Timestamps
///
/// - `ctime`: File status change time (inode modification)
/// - `mtime`: File content modification time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatSnapshot {
    /// Change time
    pub ctime: CacheTime,
    /// Modification time
    pub mtime: CacheTime,
    /// Device ID
    pub dev: u32,
    /// Inode number
    pub ino: u32,
    /// File mode (type and permissions)
    pub mode: u32,
    /// User ID of owner
    pub uid: u32,
    /// Group ID of owner
    pub gid: u32,
    /// File size in bytes
    pub size: u32,
}

impl StatSnapshot {
    pub fn decode(bytes: &[u8; STAT_DATA_SIZE]) -> Self {
        let mut words = [0u32; STAT_DATA_WORDS];
        NetworkEndian::read_u32_into(bytes, &mut words);

        let [
            ctime_sec,
            ctime_nsec,
            mtime_sec,
            mtime_nsec,
            dev,
            ino,
            mode,
            uid,
            gid,
            size,
        ] = words;

        StatSnapshot {
            ctime: CacheTime::new(ctime_sec, ctime_nsec),
            mtime: CacheTime::new(mtime_sec, mtime_nsec),
            dev,
            ino,
            mode,
            uid,
            gid,
            size,
        }
    }

    pub fn encode(&self, out: &mut [u8; STAT_DATA_SIZE]) {
        let words: [u32; STAT_DATA_WORDS] = [
            self.ctime.sec,
            self.ctime.nsec,
            self.mtime.sec,
            self.mtime.nsec,
            self.dev,
            self.ino,
            self.mode,
            self.uid,
            self.gid,
            self.size,
        ];

        NetworkEndian::write_u32_into(&words, out);
    }

    /// Take over the timestamps and the device/inode pair from `fresh`.
    ///
    /// Mode, ownership and size stay as they are, so a file whose content hash is
    /// stale still reports as changed on size or mode alone.
    pub fn refresh_from(&mut self, fresh: &StatSnapshot) {
        self.ctime = fresh.ctime;
        self.mtime = fresh.mtime;
        self.dev = fresh.dev;
        self.ino = fresh.ino;
    }
}
