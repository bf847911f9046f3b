use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Paths with uncommitted changes, untracked files included, relative to
    /// the repository root.
    ///
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn dirty_paths(&self) -> Result<Vec<String>> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false),
        ))?;

        Ok(statuses
            .iter()
            .filter_map(|entry| entry.path().map(String::from))
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.dirty_paths()?.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`GitError::DirtyWorkingTree`] listing the changed paths if
    /// the tree is not clean.
    pub fn require_clean_working_tree(&self) -> Result<()> {
        let paths = self.dirty_paths()?;
        if paths.is_empty() {
            Ok(())
        } else {
            Err(GitError::DirtyWorkingTree { paths })
        }
    }
}
