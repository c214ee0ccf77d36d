use crate::areas::index::{IndexFile, WriteMode};
use crate::areas::workspace::Workspace;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::entry_cursor::{Entries, EntriesMut};
use crate::artifacts::index::VERSION;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::stat::{PatchReport, StatPolicy};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    index: IndexFile,
    workspace: Workspace,
}

impl Repository {
    /// `index_path` is used as given; entry names resolve against `workspace_path`.
    pub fn new(
        index_path: &Path,
        workspace_path: &Path,
        mode: WriteMode,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Repository {
            writer: RefCell::new(writer),
            index: IndexFile::new(index_path.into(), mode),
            workspace: Workspace::new(workspace_path.into()),
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &IndexFile {
        &self.index
    }

    /// Parse the header and walk every entry once without touching anything.
    pub(crate) fn validate(&self, bytes: &[u8]) -> anyhow::Result<IndexHeader> {
        let path = self.index.path().display();

        let header = IndexHeader::parse(bytes).with_context(|| format!("Failed to read {path}"))?;
        if header.version != VERSION {
            tracing::warn!(
                version = header.version,
                "reading index version {} with the version {VERSION} entry layout",
                header.version
            );
        }

        Entries::new(bytes, header.entries_count)
            .try_for_each(|entry| entry.map(|_| ()))
            .with_context(|| format!("Failed to read {path}"))?;

        Ok(header)
    }

    /// Run `policy` over every entry of the index and write the result back.
    ///
    /// Nothing is written when the header or any entry turns out to be malformed.
    pub(crate) fn patch_stat(&self, policy: StatPolicy) -> anyhow::Result<PatchReport> {
        let mut buffer = self.index.open()?;
        let header = self.validate(&buffer)?;

        let report = policy.apply(
            EntriesMut::new(&mut buffer, header.entries_count),
            &self.workspace,
        )?;

        if policy.rewrites_checksum() {
            Checksum::finalize(&mut buffer)?;
        }
        buffer.persist()?;

        tracing::info!(?policy, path = %self.index.path().display(), "{report}");

        Ok(report)
    }
}
