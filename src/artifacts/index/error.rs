//! Errors raised while reading or rewriting an index file.

use std::path::PathBuf;

/// Structural problems in the index bytes themselves.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// The file cannot even hold a header and a trailing checksum.
    #[error("index file is {len} bytes long, too short for a header and checksum")]
    TruncatedHeader { len: usize },

    /// The first four bytes are not "DIRC".
    #[error("invalid index file signature {found:#010x}")]
    InvalidSignature { found: u32 },

    /// An entry (or its fixed prefix) runs past the end of the entry table.
    #[error("index entry {index} at offset {offset} runs past the end of the entry table")]
    TruncatedEntry { index: u32, offset: usize },

    /// The trailing SHA-1 does not match the content it covers.
    #[error("checksum does not match value stored on disk")]
    ChecksumMismatch,
}

/// Errors that abort a whole run over an index file.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("cannot access index file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| IndexError::Io { path, source }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
