use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use cascade_changelog::ChangelogLocation;

use crate::error::{ConfigError, ProjectError};
use crate::manifest::{CascadeMetadata, read_manifest};
use crate::project::{CargoProject, ProjectKind};

/// Validated `[workspace.metadata.cascade]` (or `[package.metadata.cascade]`
/// for a single package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeConfig {
    commit: bool,
    tags: bool,
    changelog: ChangelogLocation,
    linked: Vec<Vec<String>>,
    ignore: Vec<String>,
    changeset_dir: PathBuf,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            commit: false,
            tags: false,
            changelog: ChangelogLocation::default(),
            linked: Vec::new(),
            ignore: Vec::new(),
            changeset_dir: PathBuf::from(crate::DEFAULT_CHANGESET_DIR),
        }
    }
}

impl CascadeConfig {
    /// Stage and commit every file written by `version`.
    #[must_use]
    pub fn commit(&self) -> bool {
        self.commit
    }

    /// Tag each released package as `name@vX.Y.Z` after committing.
    #[must_use]
    pub fn tags(&self) -> bool {
        self.tags
    }

    #[must_use]
    pub fn changelog(&self) -> ChangelogLocation {
        self.changelog
    }

    /// Groups of package names that always share a bump type.
    #[must_use]
    pub fn linked(&self) -> &[Vec<String>] {
        &self.linked
    }

    /// Packages that are never bumped.
    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_tags(mut self, tags: bool) -> Self {
        self.tags = tags;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_changelog(mut self, changelog: ChangelogLocation) -> Self {
        self.changelog = changelog;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_linked(mut self, linked: Vec<Vec<String>>) -> Self {
        self.linked = linked;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    fn from_metadata(metadata: Option<CascadeMetadata>) -> Self {
        let defaults = Self::default();
        let Some(cs) = metadata else {
            return defaults;
        };

        Self {
            commit: cs.commit.unwrap_or(defaults.commit),
            tags: cs.tags.unwrap_or(defaults.tags),
            changelog: cs.changelog.unwrap_or(defaults.changelog),
            linked: cs.linked,
            ignore: cs.ignore,
            changeset_dir: cs
                .changeset_dir
                .map_or(defaults.changeset_dir, PathBuf::from),
        }
    }

    /// Checks linked groups and the ignore list against the known packages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a name that is not a package, a package in
    /// two linked groups, or an ignored package inside a linked group.
    pub fn validate<'a>(
        &self,
        package_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        let known: HashSet<&str> = package_names.into_iter().collect();

        for name in &self.ignore {
            if !known.contains(name.as_str()) {
                return Err(ConfigError::UnknownPackage {
                    field: "ignore",
                    package: name.clone(),
                });
            }
        }

        let ignored: HashSet<&str> = self.ignore.iter().map(String::as_str).collect();
        let mut group_of: HashMap<&str, usize> = HashMap::new();

        for (index, group) in self.linked.iter().enumerate() {
            for name in group {
                if !known.contains(name.as_str()) {
                    return Err(ConfigError::UnknownPackage {
                        field: "linked",
                        package: name.clone(),
                    });
                }
                if ignored.contains(name.as_str()) {
                    return Err(ConfigError::IgnoredPackageLinked {
                        package: name.clone(),
                    });
                }
                if let Some(previous) = group_of.insert(name.as_str(), index) {
                    if previous != index {
                        return Err(ConfigError::PackageInSeveralGroups {
                            package: name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Loads and validates the cascade configuration of `project`.
///
/// Single packages read `[package.metadata.cascade]`, workspaces read
/// `[workspace.metadata.cascade]`. A missing table yields the defaults.
///
/// # Errors
///
/// Returns an error if the root manifest cannot be read or parsed, or
/// `ProjectError::InvalidConfig` if validation fails.
pub fn load_config(project: &CargoProject) -> Result<CascadeConfig, ProjectError> {
    let manifest_path = project.manifest_path();
    let manifest = read_manifest(&manifest_path)?;

    let metadata = match project.kind {
        ProjectKind::SinglePackage => manifest
            .package
            .and_then(|pkg| pkg.metadata)
            .and_then(|meta| meta.cascade),
        ProjectKind::VirtualWorkspace | ProjectKind::WorkspaceWithRoot => manifest
            .workspace
            .and_then(|ws| ws.metadata)
            .and_then(|meta| meta.cascade),
    };

    let config = CascadeConfig::from_metadata(metadata);
    config
        .validate(project.packages.iter().map(|p| p.name.as_str()))
        .map_err(|source| ProjectError::InvalidConfig {
            path: manifest_path,
            source,
        })?;

    Ok(config)
}
