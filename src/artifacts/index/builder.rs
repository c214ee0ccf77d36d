//! Serializing whole index files from scratch

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{OID_SIZE, entry_span};
use crate::artifacts::index::stat_data::{STAT_DATA_SIZE, StatSnapshot};
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use byteorder::{ByteOrder, NetworkEndian};

#[derive(Debug, Clone)]
struct PendingEntry {
    name: Vec<u8>,
    oid: [u8; OID_SIZE],
    stat: StatSnapshot,
}

/// Builds an index file in the layout git writes, entries in insertion order.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    version: u32,
    entries: Vec<PendingEntry>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        IndexBuilder {
            version: VERSION,
            entries: Vec::new(),
        }
    }
}

impl IndexBuilder {
    /// Version number written into the header; the entry layout stays the same.
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Append an entry
    ///
    /// # Arguments
    ///
    /// * `name` - Raw path of the entry, at most `u16::MAX` bytes
    /// * `oid` - Object ID stored next to the stat data
    /// * `stat` - Cached stat data of the entry
    pub fn entry(mut self, name: &[u8], oid: [u8; OID_SIZE], stat: StatSnapshot) -> Self {
        self.entries.push(PendingEntry {
            name: name.to_vec(),
            oid,
            stat,
        });
        self
    }

    /// Serialize header, entries and a valid trailing checksum.
    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        NetworkEndian::write_u32_into(
            &[SIGNATURE, self.version, self.entries.len() as u32],
            &mut bytes,
        );

        for entry in &self.entries {
            let start = bytes.len();
            let mut stat = [0u8; STAT_DATA_SIZE];
            entry.stat.encode(&mut stat);
            let mut name_length = [0u8; 2];
            NetworkEndian::write_u16(&mut name_length, entry.name.len() as u16);

            bytes.extend_from_slice(&stat);
            bytes.extend_from_slice(&entry.oid);
            bytes.extend_from_slice(&name_length);
            bytes.extend_from_slice(&entry.name);
            bytes.resize(start + entry_span(entry.name.len()), 0);
        }

        let checksum = Checksum::compute(&bytes);
        bytes.extend_from_slice(&checksum);

        bytes
    }
}
