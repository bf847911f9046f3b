use std::path::{Path, PathBuf};

use cascade_project::{
    CargoProject, CascadeConfig, discover_project, ensure_changeset_dir, load_config,
};

use crate::Result;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn discover_project(&self, start_path: &Path) -> Result<CargoProject> {
        Ok(discover_project(start_path)?)
    }

    fn load_config(&self, project: &CargoProject) -> Result<CascadeConfig> {
        Ok(load_config(project)?)
    }

    fn ensure_changeset_dir(
        &self,
        project: &CargoProject,
        config: &CascadeConfig,
    ) -> Result<PathBuf> {
        Ok(ensure_changeset_dir(project, config)?)
    }
}
