//! Cursors walking the entry table of an index held in memory
//!
//! Both cursors start right after the header, stop after `entries_count` entries and
//! never look into the trailing checksum. Each step checks that the entry it is about
//! to hand out lies inside that table; the first failure is yielded once and ends the
//! walk.

use crate::artifacts::index::error::FormatError;
use crate::artifacts::index::index_entry::{CacheEntry, EntryMut};
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE};

fn entry_table(len: usize) -> std::ops::Range<usize> {
    HEADER_SIZE..len.saturating_sub(CHECKSUM_SIZE).max(HEADER_SIZE)
}

/// Read-only walk yielding `(offset, entry)` pairs.
#[derive(Debug)]
pub struct Entries<'a> {
    rest: &'a [u8],
    offset: usize,
    index: u32,
    entries_count: u32,
}

impl<'a> Entries<'a> {
    /// `index` is the whole file, header and checksum included.
    pub fn new(index: &'a [u8], entries_count: u32) -> Self {
        let table = entry_table(index.len());

        Entries {
            rest: index.get(table).unwrap_or_default(),
            offset: HEADER_SIZE,
            index: 0,
            entries_count,
        }
    }

    /// Offset of the next entry, or of the end of the table once the walk is over.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<(usize, CacheEntry<'a>), FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.entries_count {
            return None;
        }

        match CacheEntry::split_from(self.rest, self.offset, self.index) {
            Ok((entry, rest)) => {
                let offset = self.offset;
                self.rest = rest;
                self.offset += entry.span;
                self.index += 1;

                Some(Ok((offset, entry)))
            }
            Err(err) => {
                self.index = self.entries_count;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.entries_count - self.index) as usize))
    }
}

/// Mutable walk yielding `(offset, entry)` pairs whose stat data can be rewritten.
#[derive(Debug)]
pub struct EntriesMut<'a> {
    rest: &'a mut [u8],
    offset: usize,
    index: u32,
    entries_count: u32,
}

impl<'a> EntriesMut<'a> {
    /// `index` is the whole file, header and checksum included.
    pub fn new(index: &'a mut [u8], entries_count: u32) -> Self {
        let table = entry_table(index.len());

        EntriesMut {
            rest: index.get_mut(table).unwrap_or_default(),
            offset: HEADER_SIZE,
            index: 0,
            entries_count,
        }
    }
}

impl<'a> Iterator for EntriesMut<'a> {
    type Item = Result<(usize, EntryMut<'a>), FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.entries_count {
            return None;
        }

        let rest = std::mem::take(&mut self.rest);
        let len = rest.len();

        match EntryMut::split_from(rest, self.offset, self.index) {
            Ok((entry, rest)) => {
                let offset = self.offset;
                self.offset += len - rest.len();
                self.rest = rest;
                self.index += 1;

                Some(Ok((offset, entry)))
            }
            Err(err) => {
                self.index = self.entries_count;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.entries_count - self.index) as usize))
    }
}
