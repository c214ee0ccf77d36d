//! Rewriting the stat data cached in index entries
//!
//! - `Clear` re-reads every entry with `lstat` and overwrites all of its stat data.
//!   The trailing checksum is left alone, so it no longer matches.
//! - `Refresh` re-reads every entry with `stat` and, for regular files only, takes
//!   over timestamps, device and inode. The caller then recomputes the checksum.

pub mod file_stat;

use crate::artifacts::index::entry_cursor::EntriesMut;
use crate::artifacts::index::error::FormatError;
use crate::artifacts::index::index_entry::EntryMut;
use crate::artifacts::index::stat_data::StatSnapshot;
use crate::artifacts::stat::file_stat::PathMetadata;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatPolicy {
    Clear,
    Refresh,
}

/// Counts of what a policy did to the entries of one index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub entries: u32,
    pub patched: u32,
    /// Entries whose path could not be read under `Clear`
    pub zeroed: u32,
    /// Entries left untouched under `Refresh`
    pub skipped: u32,
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} patched, {} zeroed, {} skipped",
            self.entries, self.patched, self.zeroed, self.skipped
        )
    }
}

impl StatPolicy {
    /// Whether the trailing checksum has to be recomputed after this policy ran.
    pub fn rewrites_checksum(&self) -> bool {
        matches!(self, StatPolicy::Refresh)
    }

    /// Patch the stat data of every entry the cursor yields
    ///
    /// # Arguments
    ///
    /// * `entries` - Mutable walk over the entry table of a whole index
    /// * `fs` - Metadata lookups for entry names
    ///
    /// # Returns
    ///
    /// Counts of patched, zeroed and skipped entries, or the first malformed entry.
    /// Entries before a malformed one have already been rewritten.
    pub fn apply(
        &self,
        entries: EntriesMut<'_>,
        fs: &impl PathMetadata,
    ) -> Result<PatchReport, FormatError> {
        let mut report = PatchReport::default();

        for entry in entries {
            let (offset, mut entry) = entry?;
            tracing::trace!(offset, name = %entry.name().escape_ascii(), "patching entry");

            match self {
                StatPolicy::Clear => Self::clear(&mut entry, fs, &mut report),
                StatPolicy::Refresh => Self::refresh(&mut entry, fs, &mut report),
            }
            report.entries += 1;
        }

        Ok(report)
    }

    fn clear(entry: &mut EntryMut<'_>, fs: &impl PathMetadata, report: &mut PatchReport) {
        match fs.lstat(entry.name()) {
            Ok(stat) => {
                entry.set_stat(&stat.snapshot);
                report.patched += 1;
            }
            Err(err) => {
                tracing::warn!(
                    name = %entry.name().escape_ascii(),
                    error = %err,
                    "cannot lstat entry, zeroing its stat data"
                );
                entry.set_stat(&StatSnapshot::default());
                report.zeroed += 1;
            }
        }
    }

    fn refresh(entry: &mut EntryMut<'_>, fs: &impl PathMetadata, report: &mut PatchReport) {
        match fs.stat(entry.name()) {
            Ok(stat) if stat.is_regular() => {
                let mut snapshot = entry.stat();
                snapshot.refresh_from(&stat.snapshot);
                entry.set_stat(&snapshot);
                report.patched += 1;
            }
            Ok(stat) => {
                tracing::debug!(
                    name = %entry.name().escape_ascii(),
                    kind = ?stat.kind,
                    "not a regular file, leaving entry untouched"
                );
                report.skipped += 1;
            }
            Err(err) => {
                tracing::debug!(
                    name = %entry.name().escape_ascii(),
                    error = %err,
                    "cannot stat entry, leaving it untouched"
                );
                report.skipped += 1;
            }
        }
    }
}
