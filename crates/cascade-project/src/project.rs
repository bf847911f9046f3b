use std::path::{Path, PathBuf};

use cascade_core::PackageDescriptor;
use globset::{GlobBuilder, GlobMatcher};
use semver::Version;
use tracing::debug;

use crate::config::CascadeConfig;
use crate::error::ProjectError;
use crate::manifest::{CargoManifest, DependencyTable, Package, VersionField, read_manifest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectKind {
    VirtualWorkspace,
    WorkspaceWithRoot,
    SinglePackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoProject {
    pub root: PathBuf,
    pub kind: ProjectKind,
    pub packages: Vec<PackageDescriptor>,
}

impl CargoProject {
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageDescriptor> {
        self.packages.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("Cargo.toml")
    }
}

/// # Errors
///
/// Returns `ProjectError` if no project root can be found or if manifest parsing fails.
pub fn discover_project(start_dir: &Path) -> Result<CargoProject, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| ProjectError::ManifestRead {
            path: start_dir.to_path_buf(),
            source,
        })?;

    let (root, manifest) = find_project_root(&start_dir)?;
    let kind = determine_project_kind(&manifest);
    let packages = collect_packages(&root, &manifest, &kind)?;
    debug!(root = %root.display(), packages = packages.len(), "discovered project");

    Ok(CargoProject {
        root,
        kind,
        packages,
    })
}

/// # Errors
///
/// Returns `ProjectError::Io` if directory creation fails.
pub fn ensure_changeset_dir(
    project: &CargoProject,
    config: &CascadeConfig,
) -> Result<PathBuf, ProjectError> {
    let changeset_dir = project.root.join(config.changeset_dir());
    if !changeset_dir.exists() {
        std::fs::create_dir_all(&changeset_dir)?;
    }
    Ok(changeset_dir)
}

/// The nearest ancestor with a `[workspace]` table wins; otherwise the
/// closest manifest with a `[package]` table.
fn find_project_root(start_dir: &Path) -> Result<(PathBuf, CargoManifest), ProjectError> {
    let mut closest_package = None;

    for dir in start_dir.ancestors() {
        let manifest_path = dir.join("Cargo.toml");
        if !manifest_path.is_file() {
            continue;
        }

        let manifest = read_manifest(&manifest_path)?;
        if manifest.workspace.is_some() {
            return Ok((dir.to_path_buf(), manifest));
        }
        if closest_package.is_none() && manifest.package.is_some() {
            closest_package = Some((dir.to_path_buf(), manifest));
        }
    }

    closest_package.ok_or_else(|| ProjectError::NotFound {
        start_dir: start_dir.to_path_buf(),
    })
}

fn determine_project_kind(manifest: &CargoManifest) -> ProjectKind {
    match (&manifest.workspace, &manifest.package) {
        (Some(_), Some(_)) => ProjectKind::WorkspaceWithRoot,
        (None, Some(_)) => ProjectKind::SinglePackage,
        (Some(_) | None, None) => ProjectKind::VirtualWorkspace,
    }
}

fn collect_packages(
    root: &Path,
    manifest: &CargoManifest,
    kind: &ProjectKind,
) -> Result<Vec<PackageDescriptor>, ProjectError> {
    let workspace_version = manifest
        .workspace
        .as_ref()
        .and_then(|ws| ws.package.as_ref())
        .and_then(|pkg| pkg.version.as_ref());

    let no_workspace_dependencies = DependencyTable::new();
    let inherited = WorkspaceInheritance {
        version: workspace_version,
        dependencies: manifest
            .workspace_dependencies()
            .unwrap_or(&no_workspace_dependencies),
    };

    let mut packages = Vec::new();

    if let Some(pkg) = &manifest.package {
        let root_manifest = root.join("Cargo.toml");
        packages.push(describe_package(pkg, manifest, &inherited, root, &root_manifest)?);
    }

    let workspace = match kind {
        ProjectKind::SinglePackage => None,
        ProjectKind::VirtualWorkspace | ProjectKind::WorkspaceWithRoot => manifest.workspace.as_ref(),
    };
    if let Some(workspace) = workspace {
        let excludes = workspace.exclude.as_deref().unwrap_or_default();

        for pattern in workspace.members.as_deref().unwrap_or_default() {
            for member_dir in expand_glob_pattern(root, pattern, excludes)? {
                let member_manifest_path = member_dir.join("Cargo.toml");
                if !member_manifest_path.is_file() {
                    continue;
                }

                let member_manifest = read_manifest(&member_manifest_path)?;
                let Some(pkg) = &member_manifest.package else {
                    continue;
                };
                packages.push(describe_package(
                    pkg,
                    &member_manifest,
                    &inherited,
                    &member_dir,
                    &member_manifest_path,
                )?);
            }
        }
    }

    // Overlapping member globs may match a directory twice.
    packages.sort_by(|a, b| a.path.cmp(&b.path));
    packages.dedup_by(|a, b| a.path == b.path);
    Ok(packages)
}

/// What members may inherit from the workspace root.
struct WorkspaceInheritance<'a> {
    version: Option<&'a String>,
    dependencies: &'a DependencyTable,
}

fn describe_package(
    pkg: &Package,
    manifest: &CargoManifest,
    inherited: &WorkspaceInheritance<'_>,
    dir: &Path,
    manifest_path: &Path,
) -> Result<PackageDescriptor, ProjectError> {
    let version = resolve_version(pkg.version.as_ref(), inherited.version, manifest_path)?;

    Ok(manifest.dependency_names(inherited.dependencies).fold(
        PackageDescriptor::new(pkg.name.clone(), version).with_path(dir),
        |descriptor, dependency| descriptor.with_dependency(dependency),
    ))
}

fn resolve_version(
    version_field: Option<&VersionField>,
    workspace_version: Option<&String>,
    manifest_path: &Path,
) -> Result<Version, ProjectError> {
    let version_str = match version_field {
        Some(VersionField::Literal(v)) => v.clone(),
        Some(VersionField::Inherited(inherited)) if inherited.workspace => workspace_version
            .ok_or_else(|| ProjectError::MissingField {
                path: manifest_path.to_path_buf(),
                field: "workspace.package.version",
            })?
            .clone(),
        Some(VersionField::Inherited(_)) | None => {
            return Err(ProjectError::MissingField {
                path: manifest_path.to_path_buf(),
                field: "package.version",
            });
        }
    };

    version_str
        .parse()
        .map_err(|source| ProjectError::InvalidVersion {
            path: manifest_path.to_path_buf(),
            version: version_str,
            source,
        })
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
}

fn expand_glob_pattern(
    root: &Path,
    pattern: &str,
    excludes: &[String],
) -> Result<Vec<PathBuf>, ProjectError> {
    let member = compile_glob(pattern).map_err(|source| ProjectError::GlobPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    // Invalid exclude patterns exclude nothing.
    let excludes: Vec<GlobMatcher> = excludes
        .iter()
        .filter_map(|pattern| compile_glob(pattern).ok())
        .collect();

    let mut dirs = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_dir() || is_skipped_dir(&path) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(&path);
            if excludes.iter().any(|exclude| exclude.is_match(relative)) {
                continue;
            }
            if member.is_match(relative) {
                dirs.push(path.clone());
            }
            pending.push(path);
        }
    }

    Ok(dirs)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name == "target")
}
