use std::path::Path;

use tracing::debug;

use crate::Result;

use super::Repository;

impl Repository {
    /// Stages additions and modifications, and stages removal for paths that
    /// no longer exist on disk. Absolute paths must lie inside the worktree.
    ///
    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.inner.index()?;

        for path in paths {
            let relative_path = self.worktree_relative(path);

            if path.exists() || self.root().join(&relative_path).exists() {
                index.add_path(&relative_path)?;
            } else {
                index.remove_path(&relative_path)?;
            }
        }

        index.write()?;
        debug!(count = paths.len(), "staged paths");
        Ok(())
    }
}
