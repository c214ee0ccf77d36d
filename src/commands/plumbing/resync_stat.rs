use crate::areas::repository::Repository;
use crate::artifacts::stat::{PatchReport, StatPolicy};

impl Repository {
    /// Bring cached timestamps and device/inode numbers in line with the working
    /// tree without touching content hashes, then rewrite the trailing checksum.
    pub fn resync_stat(&self) -> anyhow::Result<PatchReport> {
        self.patch_stat(StatPolicy::Refresh)
    }
}
