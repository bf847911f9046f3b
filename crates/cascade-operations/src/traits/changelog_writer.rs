use std::path::{Path, PathBuf};

use cascade_changelog::VersionRelease;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogWriteResult {
    pub path: PathBuf,
    pub created: bool,
}

pub trait ChangelogWriter: Send + Sync {
    /// Adds `releases` to the changelog at `path`, keeping their order at the
    /// top of the file. A missing file is started with `# {title}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn write_releases(
        &self,
        path: &Path,
        title: &str,
        releases: &[VersionRelease],
    ) -> Result<ChangelogWriteResult>;
}
