mod changelog;
mod config;
mod entry;
mod error;
mod format;

pub use changelog::Changelog;
pub use config::ChangelogLocation;
pub use entry::{ChangelogEntry, DependencyUpdate, VersionRelease};
pub use error::ChangelogError;
pub use format::{
    format_entries, format_version_header, format_version_release, new_changelog,
};

pub type Result<T> = std::result::Result<T, ChangelogError>;
