use std::collections::BTreeMap;
use std::path::Path;

use cascade_changelog::ChangelogLocation;
use serde::Deserialize;

use crate::error::ProjectError;

#[derive(Debug, Deserialize)]
pub(crate) struct CargoManifest {
    pub(crate) package: Option<Package>,
    pub(crate) workspace: Option<WorkspaceSection>,
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
    #[serde(default, rename = "build-dependencies")]
    pub(crate) build_dependencies: DependencyTable,
    #[serde(default)]
    pub(crate) target: BTreeMap<String, TargetSection>,
}

pub(crate) type DependencyTable = BTreeMap<String, DependencySpec>;

#[derive(Debug, Deserialize, Default)]
pub(crate) struct TargetSection {
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
    #[serde(default, rename = "build-dependencies")]
    pub(crate) build_dependencies: DependencyTable,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DependencySpec {
    Version(String),
    Detailed(DetailedDependency),
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailedDependency {
    pub(crate) package: Option<String>,
    #[serde(default)]
    pub(crate) workspace: bool,
}

impl DependencySpec {
    /// Explicit `package` rename, if any.
    fn renamed(&self) -> Option<&str> {
        match self {
            DependencySpec::Detailed(detail) => detail.package.as_deref(),
            DependencySpec::Version(_) => None,
        }
    }

    fn is_inherited(&self) -> bool {
        matches!(self, DependencySpec::Detailed(detail) if detail.workspace)
    }

    /// Package name behind `key`. Entries with `workspace = true` take their
    /// rename from `[workspace.dependencies]`.
    fn package_name<'a>(&'a self, key: &'a str, inherited_from: &'a DependencyTable) -> &'a str {
        if let Some(package) = self.renamed() {
            return package;
        }
        self.is_inherited()
            .then(|| inherited_from.get(key))
            .flatten()
            .and_then(DependencySpec::renamed)
            .unwrap_or(key)
    }
}

impl CargoManifest {
    /// `[workspace.dependencies]` of a workspace root manifest.
    pub(crate) fn workspace_dependencies(&self) -> Option<&DependencyTable> {
        self.workspace.as_ref().map(|ws| &ws.dependencies)
    }

    /// Package names of every normal and build dependency, with `package`
    /// renames resolved, including renames inherited from `workspace_dependencies`.
    /// Dev-dependencies are not part of the release graph.
    pub(crate) fn dependency_names<'a>(
        &'a self,
        workspace_dependencies: &'a DependencyTable,
    ) -> impl Iterator<Item = &'a str> {
        let targets = self
            .target
            .values()
            .flat_map(|t| [&t.dependencies, &t.build_dependencies]);

        [&self.dependencies, &self.build_dependencies]
            .into_iter()
            .chain(targets)
            .flat_map(|table| table.iter())
            .map(move |(key, spec)| spec.package_name(key, workspace_dependencies))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Package {
    pub(crate) name: String,
    pub(crate) version: Option<VersionField>,
    pub(crate) metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum VersionField {
    Literal(String),
    Inherited(InheritedVersion),
}

#[derive(Debug, Deserialize)]
pub(crate) struct InheritedVersion {
    pub(crate) workspace: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceSection {
    pub(crate) members: Option<Vec<String>>,
    pub(crate) exclude: Option<Vec<String>>,
    pub(crate) package: Option<WorkspacePackage>,
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
    pub(crate) metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspacePackage {
    pub(crate) version: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct Metadata {
    pub(crate) cascade: Option<CascadeMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CascadeMetadata {
    pub(crate) commit: Option<bool>,
    pub(crate) tags: Option<bool>,
    pub(crate) changelog: Option<ChangelogLocation>,
    #[serde(default)]
    pub(crate) linked: Vec<Vec<String>>,
    #[serde(default)]
    pub(crate) ignore: Vec<String>,
    pub(crate) changeset_dir: Option<String>,
}

pub(crate) fn read_manifest(path: &Path) -> Result<CargoManifest, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ProjectError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
