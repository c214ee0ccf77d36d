use crate::areas::repository::Repository;
use crate::artifacts::index::checksum::Checksum;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn verify_index(&self) -> anyhow::Result<()> {
        let bytes = self.index().read()?;
        let header = self.validate(&bytes)?;

        let path = self.index().path().display();
        Checksum::verify(&bytes).with_context(|| format!("Failed to verify {path}"))?;

        writeln!(
            self.writer(),
            "{path}: version {}, {} entries, checksum ok",
            header.version,
            header.entries_count
        )?;

        Ok(())
    }
}
