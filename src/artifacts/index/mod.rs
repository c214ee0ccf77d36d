//! Git index file format
//!
//! The index (also called staging area or cache) caches the `stat(2)` data of every
//! tracked file next to its content hash, so that status checks can skip rehashing
//! files whose metadata did not change.
//!
//! ## File Format
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - 40 bytes of stat data, 20 bytes object ID, 2 bytes name length
//!   - Name, followed by 1..=8 NUL bytes padding the entry to 8-byte alignment
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are stored in network byte order. Only the stat data of an entry is
//! ever rewritten; entries are never added, removed or moved.

pub mod builder;
pub mod checksum;
pub mod entry_cursor;
pub mod error;
pub mod index_entry;
pub mod index_header;
pub mod stat_data;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20; // SHA1 produces a 20-byte hash

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files ("DIRC")
pub const SIGNATURE: u32 = 0x4449_5243;

/// Index file format version whose entry layout is understood
pub const VERSION: u32 = 2;
