//! Index entry layout
//!
//! Each entry in the index represents a tracked file with:
//! - Cached stat data (timestamps, device/inode, mode, ownership, size)
//! - Content hash (object ID)
//! - File path relative to the repository root
//!
//! ## Entry Format
//!
//! ```text
//!   0..40   stat data
//!  40..60   object ID
//!  60..62   name length
//!  62..     name, then NUL padding up to the next 8-byte boundary
//! ```
//!
//! The padding is never empty: a name that would end exactly on a boundary still
//! gets a full block of NUL bytes, which doubles as the name terminator.

use crate::artifacts::index::error::FormatError;
use crate::artifacts::index::stat_data::{STAT_DATA_SIZE, StatSnapshot};
use byteorder::{ByteOrder, NetworkEndian};

/// Size of the object ID stored in each entry
pub const OID_SIZE: usize = 20;

/// Offset of the name length field inside an entry
pub const NAME_LENGTH_OFFSET: usize = STAT_DATA_SIZE + OID_SIZE;

/// Size of the fixed part of an entry preceding the name
pub const ENTRY_PREFIX_SIZE: usize = NAME_LENGTH_OFFSET + 2;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Minimum size of an index entry in bytes
pub const ENTRY_MIN_SIZE: usize = entry_span(0);

/// Number of bytes an entry with a `name_length`-byte name occupies on disk.
///
/// Adds a whole block before truncating to a block boundary, which leaves between
/// one and eight NUL bytes after the name.
pub const fn entry_span(name_length: usize) -> usize {
    (ENTRY_PREFIX_SIZE + name_length + ENTRY_BLOCK) / ENTRY_BLOCK * ENTRY_BLOCK
}

/// Work out the span of the entry starting at `bytes[0]`, checking it fits.
///
/// `offset` and `index` only locate the entry in error reports.
pub(crate) fn measure_entry(bytes: &[u8], offset: usize, index: u32) -> Result<usize, FormatError> {
    let truncated = FormatError::TruncatedEntry { index, offset };

    let name_length = bytes
        .get(NAME_LENGTH_OFFSET..ENTRY_PREFIX_SIZE)
        .map(NetworkEndian::read_u16)
        .ok_or_else(|| truncated.clone())?;

    let span = entry_span(name_length as usize);
    if span > bytes.len() {
        return Err(truncated);
    }

    Ok(span)
}

// Splits everything after the stat data into object ID and name.
fn split_tail(tail: &[u8]) -> Option<(&[u8; OID_SIZE], &[u8])> {
    let (oid, tail) = tail.split_first_chunk::<OID_SIZE>()?;
    let (name_length, tail) = tail.split_first_chunk::<2>()?;
    let name = tail.get(..NetworkEndian::read_u16(name_length) as usize)?;

    Some((oid, name))
}

/// Decoded copy of one entry, borrowing its object ID and name from the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry<'a> {
    pub stat: StatSnapshot,
    pub oid: &'a [u8; OID_SIZE],
    /// Path of the entry, as raw bytes with no implied encoding
    pub name: &'a [u8],
    pub span: usize,
}

impl<'a> CacheEntry<'a> {
    /// Decode the entry at the start of `bytes`, returning it and the bytes after it.
    pub(crate) fn split_from(
        bytes: &'a [u8],
        offset: usize,
        index: u32,
    ) -> Result<(Self, &'a [u8]), FormatError> {
        let span = measure_entry(bytes, offset, index)?;
        let (entry, rest) = bytes.split_at(span);

        let (stat, tail) = entry
            .split_first_chunk::<STAT_DATA_SIZE>()
            .ok_or(FormatError::TruncatedEntry { index, offset })?;
        let (oid, name) = split_tail(tail).ok_or(FormatError::TruncatedEntry { index, offset })?;

        let entry = CacheEntry {
            stat: StatSnapshot::decode(stat),
            oid,
            name,
            span,
        };

        Ok((entry, rest))
    }
}

/// Mutable view of one entry; only its stat data can be rewritten.
#[derive(Debug)]
pub struct EntryMut<'a> {
    stat: &'a mut [u8; STAT_DATA_SIZE],
    name: &'a [u8],
}

impl<'a> EntryMut<'a> {
    /// Borrow the entry at the start of `bytes`, handing back the bytes after it.
    pub(crate) fn split_from(
        bytes: &'a mut [u8],
        offset: usize,
        index: u32,
    ) -> Result<(Self, &'a mut [u8]), FormatError> {
        let span = measure_entry(bytes, offset, index)?;
        let (entry, rest) = bytes.split_at_mut(span);

        let (stat, tail) = entry
            .split_first_chunk_mut::<STAT_DATA_SIZE>()
            .ok_or(FormatError::TruncatedEntry { index, offset })?;
        let tail: &'a [u8] = tail;
        let (_, name) = split_tail(tail).ok_or(FormatError::TruncatedEntry { index, offset })?;

        Ok((EntryMut { stat, name }, rest))
    }

    pub fn stat(&self) -> StatSnapshot {
        StatSnapshot::decode(self.stat)
    }

    pub fn set_stat(&mut self, stat: &StatSnapshot) {
        stat.encode(self.stat);
    }

    pub fn name(&self) -> &[u8] {
        self.name
    }
}
