use crate::areas::repository::Repository;
use crate::artifacts::stat::{PatchReport, StatPolicy};

impl Repository {
    /// Invalidate the cached stat data so the next status scan rehashes every file.
    pub fn ignore_stat(&self) -> anyhow::Result<PatchReport> {
        self.patch_stat(StatPolicy::Clear)
    }
}
