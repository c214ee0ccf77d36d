//! Plumbing commands (low-level index operations)
//!
//! ## Commands
//!
//! - `ignore`: Overwrite every entry's stat data from `lstat`, leaving the checksum stale
//! - `resync`: Refresh timestamps and identity of regular files and repair the checksum
//! - `verify`: Check that the index parses and that its checksum matches

pub mod ignore_stat;
pub mod resync_stat;
pub mod verify_index;
