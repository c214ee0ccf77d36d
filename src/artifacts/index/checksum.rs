//! Trailing SHA-1 checksum of the index file

use crate::artifacts::index::CHECKSUM_SIZE;
use crate::artifacts::index::error::FormatError;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone)]
pub struct Checksum {
    digest: Sha1,
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

impl Checksum {
    pub fn new() -> Self {
        Checksum {
            digest: Sha1::new(),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub fn finish(self) -> [u8; CHECKSUM_SIZE] {
        self.digest.finalize().into()
    }

    pub fn compute(data: &[u8]) -> [u8; CHECKSUM_SIZE] {
        let mut checksum = Checksum::new();
        checksum.update(data);
        checksum.finish()
    }

    /// Recompute the digest over everything but the trailing slot and store it there.
    pub fn finalize(index: &mut [u8]) -> Result<[u8; CHECKSUM_SIZE], FormatError> {
        let len = index.len();
        let (body, stored) = index
            .split_last_chunk_mut::<CHECKSUM_SIZE>()
            .ok_or(FormatError::TruncatedHeader { len })?;

        let checksum = Self::compute(body);
        *stored = checksum;

        Ok(checksum)
    }

    /// Compare the trailing digest of a whole index file with its content
    ///
    /// # Arguments
    ///
    /// * `index` - The whole file, trailing checksum included
    ///
    /// # Returns
    ///
    /// `ChecksumMismatch` if the stored digest is stale, `TruncatedHeader` if there
    /// is no room for one.
    pub fn verify(index: &[u8]) -> Result<(), FormatError> {
        let len = index.len();
        let (body, stored) = index
            .split_last_chunk::<CHECKSUM_SIZE>()
            .ok_or(FormatError::TruncatedHeader { len })?;

        if Self::compute(body) != *stored {
            return Err(FormatError::ChecksumMismatch);
        }

        Ok(())
    }
}
