use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cascade_core::{BumpType, ChangeRecord, PackageDescriptor, PackageRelease};
use indexmap::IndexSet;
use tracing::info;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    BumpSelection, ChangeRecordWriter, DescriptionInput, InteractionProvider, PackageSelection,
    ProjectProvider,
};

#[derive(Debug, Default)]
pub struct AddInput {
    pub packages: Vec<String>,
    pub bump: Option<BumpType>,
    pub package_bumps: HashMap<String, BumpType>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub enum AddResult {
    Created {
        record: ChangeRecord,
        file_path: PathBuf,
    },
    Cancelled,
    NoPackages,
}

pub struct AddOperation<P, W, I> {
    project_provider: P,
    record_writer: W,
    interaction_provider: I,
}

impl<P, W, I> AddOperation<P, W, I>
where
    P: ProjectProvider,
    W: ChangeRecordWriter,
    I: InteractionProvider,
{
    pub fn new(project_provider: P, record_writer: W, interaction_provider: I) -> Self {
        Self {
            project_provider,
            record_writer,
            interaction_provider,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered, has no packages,
    /// names an unknown package, or if the record cannot be written.
    pub fn execute(&self, start_path: &Path, input: AddInput) -> Result<AddResult> {
        let project = self.project_provider.discover_project(start_path)?;

        if project.packages.is_empty() {
            return Err(OperationError::EmptyProject(project.root));
        }

        let packages = match self.select_packages(&project.packages, &input)? {
            Some(packages) if packages.is_empty() => return Ok(AddResult::NoPackages),
            Some(packages) => packages,
            None => return Ok(AddResult::Cancelled),
        };

        let Some(releases) = self.collect_releases(&packages, &input)? else {
            return Ok(AddResult::Cancelled);
        };

        let Some(description) = self.get_description(&input)? else {
            return Ok(AddResult::Cancelled);
        };

        let description = description.trim();
        if description.is_empty() {
            return Err(OperationError::EmptyDescription);
        }

        let config = self.project_provider.load_config(&project)?;
        let changeset_dir = self
            .project_provider
            .ensure_changeset_dir(&project, &config)?;

        let (file_path, record) =
            self.record_writer
                .write_change_record(&changeset_dir, releases, description)?;
        info!(id = %record.id, packages = record.releases.len(), "created change record");

        Ok(AddResult::Created { record, file_path })
    }

    fn select_packages(
        &self,
        available: &[PackageDescriptor],
        input: &AddInput,
    ) -> Result<Option<Vec<PackageDescriptor>>> {
        let explicit_packages = collect_explicit_packages(input);

        if !explicit_packages.is_empty() {
            let packages = resolve_explicit_packages(available, &explicit_packages)?;
            return Ok(Some(packages));
        }

        if let [only] = available {
            return Ok(Some(vec![only.clone()]));
        }

        match self.interaction_provider.select_packages(available)? {
            PackageSelection::Selected(packages) => Ok(Some(packages)),
            PackageSelection::Cancelled => Ok(None),
        }
    }

    fn collect_releases(
        &self,
        packages: &[PackageDescriptor],
        input: &AddInput,
    ) -> Result<Option<Vec<PackageRelease>>> {
        let mut releases = Vec::with_capacity(packages.len());

        for package in packages {
            let bump_type = if let Some(bump) = input.package_bumps.get(&package.name) {
                *bump
            } else if let Some(bump) = input.bump {
                bump
            } else {
                match self.interaction_provider.select_bump_type(&package.name)? {
                    BumpSelection::Selected(bump) => bump,
                    BumpSelection::Cancelled => return Ok(None),
                }
            };

            releases.push(PackageRelease::new(package.name.clone(), bump_type));
        }

        Ok(Some(releases))
    }

    fn get_description(&self, input: &AddInput) -> Result<Option<String>> {
        if let Some(description) = &input.description {
            return Ok(Some(description.clone()));
        }

        match self.interaction_provider.get_description()? {
            DescriptionInput::Provided(description) => Ok(Some(description)),
            DescriptionInput::Cancelled => Ok(None),
        }
    }
}

fn collect_explicit_packages(input: &AddInput) -> Vec<String> {
    let mut packages: IndexSet<String> = input.packages.iter().cloned().collect();

    let mut bumped: Vec<&String> = input.package_bumps.keys().collect();
    bumped.sort();
    for name in bumped {
        packages.insert(name.clone());
    }

    packages.into_iter().collect()
}

fn resolve_explicit_packages(
    packages: &[PackageDescriptor],
    package_names: &[String],
) -> Result<Vec<PackageDescriptor>> {
    let mut selected = Vec::with_capacity(package_names.len());

    for name in package_names {
        let package = packages.iter().find(|p| p.name == *name).ok_or_else(|| {
            let available = packages
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            OperationError::UnknownPackage {
                name: name.clone(),
                available,
            }
        })?;
        selected.push(package.clone());
    }

    Ok(selected)
}
