use std::path::Path;

use crate::entry::VersionRelease;
use crate::error::ChangelogError;
use crate::format::{format_version_release, new_changelog};

#[derive(Debug, Clone)]
pub struct Changelog {
    content: String,
}

impl Changelog {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            content: new_changelog(title),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    /// Reads the changelog at `path`, or starts a new one titled `title` when
    /// the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file exists but cannot be read.
    pub fn open_or_new(path: &Path, title: &str) -> Result<Self, ChangelogError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::new(title))
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Inserts a release section above every existing one.
    pub fn add_release(&mut self, release: &VersionRelease) {
        let formatted = format_version_release(release);
        let insertion_point = self.find_insertion_point();

        let mut new_content = String::with_capacity(self.content.len() + formatted.len() + 2);

        new_content.push_str(&self.content[..insertion_point]);
        if !new_content.is_empty() && !new_content.ends_with("\n\n") {
            if new_content.ends_with('\n') {
                new_content.push('\n');
            } else {
                new_content.push_str("\n\n");
            }
        }
        new_content.push_str(&formatted);

        if insertion_point < self.content.len() {
            new_content.push('\n');
            new_content.push_str(&self.content[insertion_point..]);
        }

        self.content = new_content;
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn find_insertion_point(&self) -> usize {
        if self.content.starts_with("## ") {
            return 0;
        }
        self.content
            .find("\n## ")
            .map_or(self.content.len(), |pos| pos + 1)
    }
}
