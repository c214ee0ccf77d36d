use crate::artifacts::index::error::FormatError;
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE, SIGNATURE};
use byteorder::{ByteOrder, NetworkEndian};
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub signature: u32,
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    /// Decode and validate the header at the start of a whole index file.
    ///
    /// The version is not checked: every version is read with the version 2 entry
    /// layout.
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(FormatError::TruncatedHeader { len: bytes.len() });
        }

        let signature = NetworkEndian::read_u32(&bytes[0..4]);
        if signature != SIGNATURE {
            return Err(FormatError::InvalidSignature { found: signature });
        }

        let version = NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader::new(signature, version, entries_count))
    }
}
