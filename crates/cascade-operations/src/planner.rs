use std::path::{Path, PathBuf};

use cascade_core::ChangeRecord;
use cascade_project::{CargoProject, CascadeConfig};
use cascade_version::{LinkedGroup, Resolution, resolve_versions_with};
use tracing::{debug, warn};

use crate::Result;
use crate::traits::{ChangeRecordReader, ProjectProvider};

/// A change record together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecord {
    pub path: PathBuf,
    pub record: ChangeRecord,
}

/// Everything known about the next release before anything is written.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub project: CargoProject,
    pub config: CascadeConfig,
    pub records: Vec<LoadedRecord>,
    pub resolution: Resolution,
}

impl ReleasePlan {
    /// Names of packages that are not part of this release.
    #[must_use]
    pub fn unchanged_packages(&self) -> Vec<String> {
        self.project
            .packages
            .iter()
            .filter(|p| self.resolution.get(&p.name).is_none())
            .map(|p| p.name.clone())
            .collect()
    }

    #[must_use]
    pub fn record(&self, id: &str) -> Option<&ChangeRecord> {
        self.records
            .iter()
            .map(|loaded| &loaded.record)
            .find(|record| record.id == id)
    }
}

/// Discovers the project, reads its pending change records and resolves the
/// versions they imply.
///
/// # Errors
///
/// Returns an error if the project or its configuration cannot be loaded, or
/// if a change record cannot be read or parsed.
pub fn plan_release<P, R>(project_provider: &P, reader: &R, start_path: &Path) -> Result<ReleasePlan>
where
    P: ProjectProvider,
    R: ChangeRecordReader,
{
    let project = project_provider.discover_project(start_path)?;
    let config = project_provider.load_config(&project)?;

    let changeset_dir = project.root.join(config.changeset_dir());
    let mut records = Vec::new();
    for path in reader.list_change_records(&changeset_dir)? {
        let record = reader.read_change_record(&path)?;
        records.push(LoadedRecord { path, record });
    }
    debug!(
        dir = %changeset_dir.display(),
        records = records.len(),
        "loaded change records"
    );

    let linked_groups: Vec<LinkedGroup> = config
        .linked()
        .iter()
        .map(|group| LinkedGroup::new(group.iter().map(String::as_str)))
        .collect();
    let change_records: Vec<ChangeRecord> =
        records.iter().map(|loaded| loaded.record.clone()).collect();

    let resolution = resolve_versions_with(
        &project.packages,
        &linked_groups,
        &change_records,
        config.ignore(),
    );

    for name in &resolution.unknown_packages {
        warn!(package = %name, "change record names a package that is not in the project");
    }

    Ok(ReleasePlan {
        project,
        config,
        records,
        resolution,
    })
}
