use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Where release notes are written.
///
/// In manifest metadata this is either `false` or one of `"per-package"` and
/// `"root"`; `true` selects the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangelogLocation {
    Disabled,
    #[default]
    PerPackage,
    Root,
}

impl ChangelogLocation {
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    /// Changelog file for a package living in `package_dir`, or `None` when
    /// changelogs are disabled.
    #[must_use]
    pub fn path_for(self, project_root: &Path, package_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Disabled => None,
            Self::PerPackage => Some(package_dir.join(CHANGELOG_FILE)),
            Self::Root => Some(project_root.join(CHANGELOG_FILE)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Flag(bool),
    Named(NamedLocation),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum NamedLocation {
    PerPackage,
    Root,
}

impl<'de> Deserialize<'de> for ChangelogLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLocation::deserialize(deserializer)? {
            RawLocation::Flag(false) => Self::Disabled,
            RawLocation::Flag(true) => Self::default(),
            RawLocation::Named(NamedLocation::PerPackage) => Self::PerPackage,
            RawLocation::Named(NamedLocation::Root) => Self::Root,
        })
    }
}
