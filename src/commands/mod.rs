//! Command implementations
//!
//! Every command is a plumbing-level operation on the index file: it bypasses the
//! usual `update-index` path and rewrites cached stat data directly.

pub mod plumbing;
