//! Index data structures and algorithms
//!
//! - `index`: Index file format (header, entries, checksum)
//! - `stat`: Policies rewriting the stat data of index entries

pub mod index;
pub mod stat;
