use std::path::{Path, PathBuf};

use cascade_project::{CargoProject, CascadeConfig};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no Cargo project is found from `start_path`.
    fn discover_project(&self, start_path: &Path) -> Result<CargoProject>;

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is invalid.
    fn load_config(&self, project: &CargoProject) -> Result<CascadeConfig>;

    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_changeset_dir(
        &self,
        project: &CargoProject,
        config: &CascadeConfig,
    ) -> Result<PathBuf>;
}
