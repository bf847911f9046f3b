use std::path::Path;

use cascade_core::ChangeRecord;
use cascade_version::ResolvedBump;
use serde::Serialize;

use crate::Result;
use crate::planner::plan_release;
use crate::traits::{ChangeRecordReader, ProjectProvider};

/// Pending releases as they would be applied by the next `version` run.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub change_records: Vec<ChangeRecord>,
    pub releases: Vec<ResolvedBump>,
    pub unknown_packages: Vec<String>,
    pub unchanged_packages: Vec<String>,
}

impl StatusOutput {
    /// Records that mention `package`, with the bump each one requests.
    /// Lets callers show disagreeing requests that the resolution folded
    /// into a single maximum.
    #[must_use]
    pub fn requests_for(&self, package: &str) -> Vec<(&str, cascade_core::BumpType)> {
        self.change_records
            .iter()
            .flat_map(|record| {
                record
                    .releases
                    .iter()
                    .filter(move |release| release.name == package)
                    .map(move |release| (record.id.as_str(), release.bump_type))
            })
            .collect()
    }
}

pub struct StatusOperation<P, R> {
    project_provider: P,
    record_reader: R,
}

impl<P, R> StatusOperation<P, R>
where
    P: ProjectProvider,
    R: ChangeRecordReader,
{
    pub fn new(project_provider: P, record_reader: R) -> Self {
        Self {
            project_provider,
            record_reader,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered or if change
    /// record files cannot be read.
    pub fn execute(&self, start_path: &Path) -> Result<StatusOutput> {
        let plan = plan_release(&self.project_provider, &self.record_reader, start_path)?;
        let unchanged_packages = plan.unchanged_packages();

        Ok(StatusOutput {
            change_records: plan.records.into_iter().map(|loaded| loaded.record).collect(),
            releases: plan.resolution.releases,
            unknown_packages: plan.resolution.unknown_packages,
            unchanged_packages,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cascade_core::BumpType;
    use semver::Version;

    use super::*;
    use crate::mocks::{MockChangeRecordIO, MockProjectProvider, make_record};

    #[test]
    fn returns_empty_when_no_records() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let operation = StatusOperation::new(project_provider, MockChangeRecordIO::new());

        let result = operation
            .execute(Path::new("/any"))
            .expect("StatusOperation failed for project with no records");

        assert!(result.change_records.is_empty());
        assert!(result.releases.is_empty());
        assert_eq!(result.unchanged_packages, vec!["my-crate"]);
    }

    #[test]
    fn resolves_the_maximum_of_competing_requests() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let reader = MockChangeRecordIO::new()
            .with_record(
                PathBuf::from("/mock/project/.changeset/fix.md"),
                make_record("fix", "my-crate", BumpType::Patch, "Fix bug"),
            )
            .with_record(
                PathBuf::from("/mock/project/.changeset/feature.md"),
                make_record("feature", "my-crate", BumpType::Minor, "Add feature"),
            );

        let result = StatusOperation::new(project_provider, reader)
            .execute(Path::new("/any"))
            .expect("StatusOperation failed to aggregate records");

        assert_eq!(result.releases.len(), 1);
        assert_eq!(result.releases[0].bump_type, BumpType::Minor);
        assert_eq!(result.releases[0].new_version, Version::new(1, 1, 0));

        let mut requests = result.requests_for("my-crate");
        requests.sort_unstable();
        assert_eq!(
            requests,
            vec![("feature", BumpType::Minor), ("fix", BumpType::Patch)]
        );
    }

    #[test]
    fn dependents_show_up_as_propagated_releases() {
        let project_provider = MockProjectProvider::workspace_with_dependencies(vec![
            ("core", "1.0.0", vec![]),
            ("app", "2.0.0", vec!["core"]),
            ("docs", "0.1.0", vec![]),
        ]);
        let reader = MockChangeRecordIO::new().with_record(
            PathBuf::from("/mock/workspace/.changeset/core.md"),
            make_record("core", "core", BumpType::Major, "Rewrite"),
        );

        let result = StatusOperation::new(project_provider, reader)
            .execute(Path::new("/any"))
            .expect("StatusOperation failed");

        let app = result
            .releases
            .iter()
            .find(|r| r.name == "app")
            .expect("app is released");
        assert!(app.is_propagated_only());
        assert_eq!(app.new_version, Version::new(2, 0, 1));
        assert_eq!(result.unchanged_packages, vec!["docs"]);
    }

    #[test]
    fn unknown_packages_are_listed() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let reader = MockChangeRecordIO::new().with_record(
            PathBuf::from("/mock/project/.changeset/typo.md"),
            make_record("typo", "my-crat", BumpType::Patch, "Typo"),
        );

        let result = StatusOperation::new(project_provider, reader)
            .execute(Path::new("/any"))
            .expect("StatusOperation failed");

        assert!(result.releases.is_empty());
        assert_eq!(result.unknown_packages, vec!["my-crat"]);
    }
}
