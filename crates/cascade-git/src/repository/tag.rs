use tracing::debug;

use crate::{GitError, Result, TagInfo};

use super::Repository;

impl Repository {
    #[must_use]
    pub fn tag_exists(&self, name: &str) -> bool {
        self.inner
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagExists`] if the tag is already present, or an
    /// error if the tag cannot be created.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        if self.tag_exists(name) {
            return Err(GitError::TagExists {
                name: name.to_string(),
            });
        }

        let head = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, head.as_object(), &sig, message, false)?;
        debug!(tag = name, "created tag");

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: head.id().to_string(),
        })
    }
}
