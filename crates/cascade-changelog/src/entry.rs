use chrono::NaiveDate;
use semver::Version;

use cascade_core::BumpType;

/// One line in a release section, taken from a change record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub bump_type: BumpType,
    pub record_id: String,
    pub description: String,
}

impl ChangelogEntry {
    #[must_use]
    pub fn new(
        bump_type: BumpType,
        record_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            bump_type,
            record_id: record_id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUpdate {
    pub name: String,
    pub version: Version,
}

impl DependencyUpdate {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Release notes for one package version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRelease {
    /// Set when several packages share one changelog file.
    pub package: Option<String>,
    pub version: Version,
    pub bump_type: BumpType,
    pub date: NaiveDate,
    pub entries: Vec<ChangelogEntry>,
    pub updated_dependencies: Vec<DependencyUpdate>,
}

impl VersionRelease {
    #[must_use]
    pub fn new(version: Version, bump_type: BumpType, date: NaiveDate) -> Self {
        Self {
            package: None,
            version,
            bump_type,
            date,
            entries: Vec::new(),
            updated_dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<ChangelogEntry>) -> Self {
        self.entries = entries;
        self
    }

    #[must_use]
    pub fn with_updated_dependencies(mut self, updates: Vec<DependencyUpdate>) -> Self {
        self.updated_dependencies = updates;
        self
    }
}
