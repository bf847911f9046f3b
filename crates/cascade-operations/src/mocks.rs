use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cascade_changelog::VersionRelease;
use cascade_core::{BumpType, ChangeRecord, PackageDescriptor, PackageRelease};
use cascade_git::{CommitInfo, TagInfo};
use cascade_project::{CargoProject, CascadeConfig, ProjectKind};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    BumpSelection, ChangeRecordReader, ChangeRecordWriter, ChangelogWriteResult, ChangelogWriter,
    DescriptionInput, GitProvider, InteractionProvider, ManifestUpdate, ManifestWriter,
    PackageSelection, ProjectProvider,
};

pub struct MockProjectProvider {
    project: CargoProject,
    config: CascadeConfig,
}

impl MockProjectProvider {
    #[must_use]
    pub fn new(project: CargoProject) -> Self {
        Self {
            project,
            config: CascadeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CascadeConfig) -> Self {
        self.config = config;
        self
    }

    /// # Panics
    ///
    /// Panics if the version string is not valid semver.
    #[must_use]
    pub fn single_package(name: &str, version: &str) -> Self {
        let root = PathBuf::from("/mock/project");
        let project = CargoProject {
            root: root.clone(),
            kind: ProjectKind::SinglePackage,
            packages: vec![
                PackageDescriptor::new(name, version.parse().expect("valid version"))
                    .with_path(root),
            ],
        };
        Self::new(project)
    }

    /// # Panics
    ///
    /// Panics if any version string is not valid semver.
    #[must_use]
    pub fn workspace(packages: Vec<(&str, &str)>) -> Self {
        Self::workspace_with_dependencies(
            packages
                .into_iter()
                .map(|(name, version)| (name, version, Vec::new()))
                .collect(),
        )
    }

    /// # Panics
    ///
    /// Panics if any version string is not valid semver.
    #[must_use]
    pub fn workspace_with_dependencies(packages: Vec<(&str, &str, Vec<&str>)>) -> Self {
        let packages = packages
            .into_iter()
            .map(|(name, version, dependencies)| {
                dependencies
                    .into_iter()
                    .fold(make_package(name, version), PackageDescriptor::with_dependency)
            })
            .collect();

        Self::new(CargoProject {
            root: PathBuf::from("/mock/workspace"),
            kind: ProjectKind::VirtualWorkspace,
            packages,
        })
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_project(&self, _start_path: &Path) -> Result<CargoProject> {
        Ok(self.project.clone())
    }

    fn load_config(&self, _project: &CargoProject) -> Result<CascadeConfig> {
        Ok(self.config.clone())
    }

    fn ensure_changeset_dir(
        &self,
        project: &CargoProject,
        config: &CascadeConfig,
    ) -> Result<PathBuf> {
        Ok(project.root.join(config.changeset_dir()))
    }
}

/// In-memory change record store that remembers writes and removals.
#[derive(Default)]
pub struct MockChangeRecordIO {
    records: Vec<(PathBuf, ChangeRecord)>,
    next_id: Option<String>,
    written: Mutex<Vec<(PathBuf, ChangeRecord)>>,
    removed: Mutex<Vec<PathBuf>>,
}

impl MockChangeRecordIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(mut self, path: PathBuf, record: ChangeRecord) -> Self {
        self.records.push((path, record));
        self
    }

    /// Id given to the next written record.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.next_id = Some(id.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_records(&self) -> Vec<(PathBuf, ChangeRecord)> {
        self.written.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().expect("lock poisoned").clone()
    }
}

impl ChangeRecordReader for MockChangeRecordIO {
    fn list_change_records(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = self
            .records
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn read_change_record(&self, path: &Path) -> Result<ChangeRecord> {
        self.records
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| OperationError::ChangeRecordRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock record missing"),
            })
    }
}

impl ChangeRecordWriter for MockChangeRecordIO {
    fn write_change_record(
        &self,
        dir: &Path,
        releases: Vec<PackageRelease>,
        summary: &str,
    ) -> Result<(PathBuf, ChangeRecord)> {
        let mut written = self.written.lock().expect("lock poisoned");
        let id = self
            .next_id
            .clone()
            .unwrap_or_else(|| format!("record-{}", written.len() + 1));
        let record = ChangeRecord::new(id, releases, summary);
        let path = dir.join(format!("{}.md", record.id));
        written.push((path.clone(), record.clone()));
        Ok((path, record))
    }

    fn remove_change_record(&self, path: &Path) -> Result<()> {
        self.removed
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());
        Ok(())
    }
}

impl ChangeRecordReader for &MockChangeRecordIO {
    fn list_change_records(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_change_records(dir)
    }

    fn read_change_record(&self, path: &Path) -> Result<ChangeRecord> {
        (**self).read_change_record(path)
    }
}

impl ChangeRecordWriter for &MockChangeRecordIO {
    fn write_change_record(
        &self,
        dir: &Path,
        releases: Vec<PackageRelease>,
        summary: &str,
    ) -> Result<(PathBuf, ChangeRecord)> {
        (**self).write_change_record(dir, releases, summary)
    }

    fn remove_change_record(&self, path: &Path) -> Result<()> {
        (**self).remove_change_record(path)
    }
}

pub struct MockGitProvider {
    clean: bool,
    staged_files: Mutex<Vec<PathBuf>>,
    commits: Mutex<Vec<String>>,
    tags_created: Mutex<Vec<(String, String)>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clean: true,
            staged_files: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
            tags_created: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn is_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.staged_files.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tags_created(&self) -> Vec<(String, String)> {
        self.tags_created.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn is_working_tree_clean(&self, _project_root: &Path) -> Result<bool> {
        Ok(self.clean)
    }

    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.staged_files
            .lock()
            .expect("lock poisoned")
            .extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.commits
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        Ok(CommitInfo {
            sha: "abc123def456".to_string(),
            message: message.to_string(),
        })
    }

    fn create_tag(&self, _project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        self.tags_created
            .lock()
            .expect("lock poisoned")
            .push((tag_name.to_string(), message.to_string()));
        Ok(TagInfo {
            name: tag_name.to_string(),
            target_sha: "abc123def456".to_string(),
        })
    }
}

impl GitProvider for &MockGitProvider {
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        (**self).is_working_tree_clean(project_root)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        (**self).stage_files(project_root, paths)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        (**self).commit(project_root, message)
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        (**self).create_tag(project_root, tag_name, message)
    }
}

#[derive(Default)]
pub struct MockManifestWriter {
    applied: Mutex<Vec<(PathBuf, ManifestUpdate)>>,
}

impl MockManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn applied(&self) -> Vec<(PathBuf, ManifestUpdate)> {
        self.applied.lock().expect("lock poisoned").clone()
    }
}

impl ManifestWriter for MockManifestWriter {
    fn apply(&self, manifest_path: &Path, update: &ManifestUpdate) -> Result<bool> {
        self.applied
            .lock()
            .expect("lock poisoned")
            .push((manifest_path.to_path_buf(), update.clone()));
        Ok(!update.is_empty())
    }
}

impl ManifestWriter for &MockManifestWriter {
    fn apply(&self, manifest_path: &Path, update: &ManifestUpdate) -> Result<bool> {
        (**self).apply(manifest_path, update)
    }
}

type WrittenChangelog = (PathBuf, String, Vec<VersionRelease>);

#[derive(Default)]
pub struct MockChangelogWriter {
    written: Mutex<Vec<WrittenChangelog>>,
}

impl MockChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<WrittenChangelog> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl ChangelogWriter for MockChangelogWriter {
    fn write_releases(
        &self,
        path: &Path,
        title: &str,
        releases: &[VersionRelease],
    ) -> Result<ChangelogWriteResult> {
        self.written.lock().expect("lock poisoned").push((
            path.to_path_buf(),
            title.to_string(),
            releases.to_vec(),
        ));
        Ok(ChangelogWriteResult {
            path: path.to_path_buf(),
            created: true,
        })
    }
}

impl ChangelogWriter for &MockChangelogWriter {
    fn write_releases(
        &self,
        path: &Path,
        title: &str,
        releases: &[VersionRelease],
    ) -> Result<ChangelogWriteResult> {
        (**self).write_releases(path, title, releases)
    }
}

pub struct MockInteractionProvider {
    pub package_selection: PackageSelection,
    pub bump_selections: Mutex<Vec<BumpType>>,
    pub description: DescriptionInput,
}

impl MockInteractionProvider {
    #[must_use]
    pub fn all_cancelled() -> Self {
        Self {
            package_selection: PackageSelection::Cancelled,
            bump_selections: Mutex::new(Vec::new()),
            description: DescriptionInput::Cancelled,
        }
    }

    #[must_use]
    pub fn with_selections(
        packages: Vec<PackageDescriptor>,
        bump: BumpType,
        description: &str,
    ) -> Self {
        Self {
            package_selection: PackageSelection::Selected(packages),
            bump_selections: Mutex::new(vec![bump]),
            description: DescriptionInput::Provided(description.to_string()),
        }
    }

    #[must_use]
    pub fn with_bump_sequence(self, bumps: Vec<BumpType>) -> Self {
        Self {
            bump_selections: Mutex::new(bumps),
            ..self
        }
    }
}

impl InteractionProvider for MockInteractionProvider {
    fn select_packages(&self, _available: &[PackageDescriptor]) -> Result<PackageSelection> {
        Ok(self.package_selection.clone())
    }

    fn select_bump_type(&self, _package_name: &str) -> Result<BumpSelection> {
        let mut selections = self.bump_selections.lock().expect("lock poisoned");
        if selections.is_empty() {
            return Ok(BumpSelection::Cancelled);
        }
        Ok(BumpSelection::Selected(selections.remove(0)))
    }

    fn get_description(&self) -> Result<DescriptionInput> {
        Ok(self.description.clone())
    }
}

/// # Panics
///
/// Panics if the version string is not valid semver.
#[must_use]
pub fn make_package(name: &str, version: &str) -> PackageDescriptor {
    PackageDescriptor::new(name, version.parse().expect("valid version"))
        .with_path(format!("/mock/workspace/crates/{name}"))
}

#[must_use]
pub fn make_record(id: &str, package: &str, bump: BumpType, summary: &str) -> ChangeRecord {
    ChangeRecord::new(id, vec![PackageRelease::new(package, bump)], summary)
}
