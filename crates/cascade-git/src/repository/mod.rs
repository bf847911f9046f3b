mod commit;
mod staging;
mod status;
mod tag;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{GitError, Result};

/// A non-bare git repository, discovered from any path inside its worktree.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if `path` is not inside a git
    /// worktree. Bare repositories are rejected the same way.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repository = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = git2::Repository::discover(path).map_err(|_| not_a_repository())?;
        // dunce drops the \\?\ prefix on Windows
        let workdir = inner
            .workdir()
            .map(|dir| dunce::simplified(dir).to_path_buf())
            .ok_or_else(not_a_repository)?;

        debug!(workdir = %workdir.display(), "opened git repository");
        Ok(Self { inner, workdir })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.workdir
    }

    /// Index paths are relative to the worktree; relative input is taken as is.
    pub(crate) fn worktree_relative(&self, path: &Path) -> PathBuf {
        if !path.is_absolute() {
            return path.to_path_buf();
        }
        dunce::simplified(path)
            .strip_prefix(&self.workdir)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}
