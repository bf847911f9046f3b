use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cascade_changelog::{ChangelogEntry, ChangelogLocation, DependencyUpdate, VersionRelease};
use cascade_core::BumpType;
use cascade_git::{CommitInfo, TagInfo};
use cascade_project::ProjectKind;
use cascade_version::ResolvedBump;
use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use semver::Version;
use tracing::{debug, info};

use crate::Result;
use crate::error::OperationError;
use crate::planner::{ReleasePlan, plan_release};
use crate::traits::{
    ChangeRecordReader, ChangeRecordWriter, ChangelogWriter, GitProvider, ManifestUpdate,
    ManifestWriter, ProjectProvider,
};

const COMMIT_TITLE: &str = "Version packages";
const ROOT_CHANGELOG_TITLE: &str = "Changelog";

#[derive(Debug, Clone)]
pub struct VersionInput {
    pub dry_run: bool,
    /// Skip staging, committing and tagging even if the config enables them.
    pub no_commit: bool,
    pub release_date: NaiveDate,
}

impl Default for VersionInput {
    fn default() -> Self {
        Self {
            dry_run: false,
            no_commit: false,
            release_date: Local::now().date_naive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogUpdate {
    pub path: PathBuf,
    pub packages: Vec<String>,
    pub created: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GitOutcome {
    pub commit: Option<CommitInfo>,
    pub tags: Vec<TagInfo>,
}

#[derive(Debug, Clone)]
pub struct VersionOutput {
    pub releases: Vec<ResolvedBump>,
    pub unknown_packages: Vec<String>,
    /// Manifests that were rewritten; for a dry run, the manifests of the
    /// released packages.
    pub manifests: Vec<PathBuf>,
    pub changelogs: Vec<ChangelogUpdate>,
    pub removed_records: Vec<PathBuf>,
    pub git: Option<GitOutcome>,
}

#[derive(Debug)]
pub enum VersionOutcome {
    NoChangesets,
    DryRun(VersionOutput),
    Executed(VersionOutput),
}

struct PendingChangelog {
    title: String,
    packages: Vec<String>,
    releases: Vec<VersionRelease>,
}

pub struct VersionOperation<P, RW, M, C, G> {
    project_provider: P,
    record_io: RW,
    manifest_writer: M,
    changelog_writer: C,
    git_provider: G,
}

impl<P, RW, M, C, G> VersionOperation<P, RW, M, C, G>
where
    P: ProjectProvider,
    RW: ChangeRecordReader + ChangeRecordWriter,
    M: ManifestWriter,
    C: ChangelogWriter,
    G: GitProvider,
{
    pub fn new(
        project_provider: P,
        record_io: RW,
        manifest_writer: M,
        changelog_writer: C,
        git_provider: G,
    ) -> Self {
        Self {
            project_provider,
            record_io,
            manifest_writer,
            changelog_writer,
            git_provider,
        }
    }

    /// Applies every pending change record: bumps manifests, writes
    /// changelogs, removes the consumed records and, when configured, commits
    /// and tags the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be loaded, the working tree is
    /// dirty while committing is enabled, or any file or git write fails.
    /// Writes already made before the failure are left in place.
    pub fn execute(&self, start_path: &Path, input: &VersionInput) -> Result<VersionOutcome> {
        let plan = plan_release(&self.project_provider, &self.record_io, start_path)?;

        if plan.resolution.is_empty() {
            return Ok(VersionOutcome::NoChangesets);
        }

        let manifest_updates = manifest_updates(&plan);
        let changelogs = pending_changelogs(&plan, input.release_date);

        if input.dry_run {
            return Ok(VersionOutcome::DryRun(VersionOutput {
                releases: plan.resolution.releases.clone(),
                unknown_packages: plan.resolution.unknown_packages.clone(),
                manifests: manifest_updates
                    .into_iter()
                    .filter(|(_, update)| update.package_version.is_some())
                    .map(|(path, _)| path)
                    .collect(),
                changelogs: changelogs
                    .into_iter()
                    .map(|(path, pending)| ChangelogUpdate {
                        created: !path.exists(),
                        packages: pending.packages,
                        path,
                    })
                    .collect(),
                removed_records: plan.records.iter().map(|r| r.path.clone()).collect(),
                git: None,
            }));
        }

        let should_commit = plan.config.commit() && !input.no_commit;
        if should_commit && !self.git_provider.is_working_tree_clean(&plan.project.root)? {
            return Err(OperationError::DirtyWorkingTree);
        }

        let mut manifests = Vec::new();
        for (path, update) in &manifest_updates {
            if self.manifest_writer.apply(path, update)? {
                manifests.push(path.clone());
            }
        }

        let mut changelog_updates = Vec::new();
        for (path, pending) in &changelogs {
            let result = self
                .changelog_writer
                .write_releases(path, &pending.title, &pending.releases)?;
            changelog_updates.push(ChangelogUpdate {
                path: result.path,
                packages: pending.packages.clone(),
                created: result.created,
            });
        }

        let mut removed_records = Vec::new();
        for loaded in &plan.records {
            self.record_io.remove_change_record(&loaded.path)?;
            removed_records.push(loaded.path.clone());
        }

        let git = if should_commit {
            Some(self.commit_and_tag(
                &plan,
                &manifests,
                &changelog_updates,
                &removed_records,
            )?)
        } else {
            None
        };

        info!(
            releases = plan.resolution.releases.len(),
            manifests = manifests.len(),
            changelogs = changelog_updates.len(),
            "versioned packages"
        );

        Ok(VersionOutcome::Executed(VersionOutput {
            releases: plan.resolution.releases,
            unknown_packages: plan.resolution.unknown_packages,
            manifests,
            changelogs: changelog_updates,
            removed_records,
            git,
        }))
    }

    fn commit_and_tag(
        &self,
        plan: &ReleasePlan,
        manifests: &[PathBuf],
        changelogs: &[ChangelogUpdate],
        removed_records: &[PathBuf],
    ) -> Result<GitOutcome> {
        let root = &plan.project.root;

        let paths: Vec<&Path> = manifests
            .iter()
            .chain(changelogs.iter().map(|c| &c.path))
            .chain(removed_records)
            .map(PathBuf::as_path)
            .collect();
        self.git_provider.stage_files(root, &paths)?;

        let message = commit_message(&plan.resolution.releases);
        let commit = self.git_provider.commit(root, &message)?;
        info!(sha = %commit.sha, "committed release");

        let mut tags = Vec::new();
        if plan.config.tags() {
            for release in &plan.resolution.releases {
                let name = tag_name(&release.name, &release.new_version);
                let message = format!("{} {}", release.name, release.new_version);
                let tag = self.git_provider.create_tag(root, &name, &message)?;
                debug!(tag = %tag.name, "created tag");
                tags.push(tag);
            }
        }

        Ok(GitOutcome {
            commit: Some(commit),
            tags,
        })
    }
}

/// `name@vX.Y.Z`.
#[must_use]
pub fn tag_name(package: &str, version: &Version) -> String {
    format!("{package}@v{version}")
}

fn commit_message(releases: &[ResolvedBump]) -> String {
    let body: Vec<String> = releases
        .iter()
        .map(|r| format!("- {}: {} -> {}", r.name, r.old_version, r.new_version))
        .collect();
    format!("{COMMIT_TITLE}\n\n{}\n", body.join("\n"))
}

/// Edits per manifest, in package order followed by the root manifest. Every
/// manifest gets the full list of released versions so internal
/// requirements on them are rewritten wherever they appear.
fn manifest_updates(plan: &ReleasePlan) -> Vec<(PathBuf, ManifestUpdate)> {
    let released: Vec<(String, Version)> = plan
        .resolution
        .releases
        .iter()
        .map(|r| (r.name.clone(), r.new_version.clone()))
        .collect();

    let mut updates: IndexMap<PathBuf, ManifestUpdate> = IndexMap::new();
    for package in &plan.project.packages {
        let update = updates.entry(package.manifest_path()).or_default();
        update.package_version = plan
            .resolution
            .get(&package.name)
            .map(|r| r.new_version.clone());
        update.dependencies.clone_from(&released);
    }

    if plan.project.kind == ProjectKind::VirtualWorkspace {
        updates
            .entry(plan.project.manifest_path())
            .or_default()
            .dependencies
            .clone_from(&released);
    }

    updates.into_iter().collect()
}

/// Release sections grouped by the changelog file they go to.
fn pending_changelogs(
    plan: &ReleasePlan,
    date: NaiveDate,
) -> IndexMap<PathBuf, PendingChangelog> {
    let location = plan.config.changelog();
    let new_versions: HashMap<&str, &Version> = plan
        .resolution
        .releases
        .iter()
        .map(|r| (r.name.as_str(), &r.new_version))
        .collect();

    let mut changelogs: IndexMap<PathBuf, PendingChangelog> = IndexMap::new();
    for release in &plan.resolution.releases {
        let Some(package) = plan.project.package(&release.name) else {
            continue;
        };
        let Some(path) = location.path_for(&plan.project.root, &package.path) else {
            continue;
        };

        let mut version_release =
            VersionRelease::new(release.new_version.clone(), release.bump_type, date)
                .with_entries(changelog_entries(plan, release))
                .with_updated_dependencies(
                    release
                        .updated_dependencies
                        .iter()
                        .filter_map(|name| {
                            new_versions
                                .get(name.as_str())
                                .map(|v| DependencyUpdate::new(name.clone(), (*v).clone()))
                        })
                        .collect(),
                );

        let title = if location == ChangelogLocation::Root {
            version_release = version_release.with_package(release.name.clone());
            ROOT_CHANGELOG_TITLE.to_string()
        } else {
            release.name.clone()
        };

        let pending = changelogs
            .entry(path)
            .or_insert_with(|| PendingChangelog {
                title,
                packages: Vec::new(),
                releases: Vec::new(),
            });
        pending.packages.push(release.name.clone());
        pending.releases.push(version_release);
    }

    changelogs
}

fn changelog_entries(plan: &ReleasePlan, release: &ResolvedBump) -> Vec<ChangelogEntry> {
    release
        .change_records
        .iter()
        .filter_map(|id| plan.record(id))
        .map(|record| {
            let bump = record
                .releases
                .iter()
                .find(|r| r.name == release.name)
                .map_or(BumpType::Patch, |r| r.bump_type);
            ChangelogEntry::new(bump, record.id.clone(), record.summary.trim())
        })
        .collect()
}
