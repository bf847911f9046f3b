mod config;
mod error;
mod manifest;
mod project;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";

pub use config::{CascadeConfig, load_config};
pub use error::{ConfigError, ProjectError};
pub use project::{CargoProject, ProjectKind, discover_project, ensure_changeset_dir};

pub type Result<T> = std::result::Result<T, ProjectError>;
