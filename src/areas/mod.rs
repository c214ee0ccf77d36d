//! Core repository components
//!
//! - `index`: The index file on disk and the buffer it is patched through
//! - `repository`: Coordination of index and workspace for a single run
//! - `workspace`: Working directory metadata lookups

pub mod index;
pub mod repository;
pub mod workspace;
