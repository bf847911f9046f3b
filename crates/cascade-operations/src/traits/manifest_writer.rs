use std::path::Path;

use semver::Version;

use crate::Result;

/// Edits to apply to one manifest in a single write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestUpdate {
    /// New `package.version`, for a released package's own manifest.
    pub package_version: Option<Version>,
    /// Released packages whose requirement must be rewritten wherever the
    /// manifest depends on them.
    pub dependencies: Vec<(String, Version)>,
}

impl ManifestUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.package_version.is_none() && self.dependencies.is_empty()
    }
}

pub trait ManifestWriter: Send + Sync {
    /// Applies `update` to the manifest at `manifest_path`. Returns whether
    /// the file changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read, edited or written.
    fn apply(&self, manifest_path: &Path, update: &ManifestUpdate) -> Result<bool>;
}
