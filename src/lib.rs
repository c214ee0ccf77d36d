//! Direct rewriting of the stat data git caches in its index file.
//!
//! - `artifacts`: the index format (header, entries, checksum) and the stat policies
//! - `areas`: the index file on disk, the working tree and the repository tying them together
//! - `commands`: the operations exposed by the `git-index-stat` binary

pub mod areas;
pub mod artifacts;
pub mod commands;
