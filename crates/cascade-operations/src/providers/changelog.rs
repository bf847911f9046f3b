use std::path::Path;

use cascade_changelog::{Changelog, VersionRelease};
use tracing::debug;

use crate::Result;
use crate::traits::{ChangelogWriteResult, ChangelogWriter};

pub struct FileSystemChangelogWriter;

impl FileSystemChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for FileSystemChangelogWriter {
    fn write_releases(
        &self,
        path: &Path,
        title: &str,
        releases: &[VersionRelease],
    ) -> Result<ChangelogWriteResult> {
        let created = !path.exists();
        let mut changelog = Changelog::open_or_new(path, title)?;

        // each release is inserted above the previous ones
        for release in releases.iter().rev() {
            changelog.add_release(release);
        }
        changelog.write_to_file(path)?;
        debug!(path = %path.display(), releases = releases.len(), created, "wrote changelog");

        Ok(ChangelogWriteResult {
            path: path.to_path_buf(),
            created,
        })
    }
}
