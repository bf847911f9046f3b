mod change_record_io;
mod changelog_writer;
mod git_provider;
mod interaction;
mod manifest_writer;
mod project_provider;

pub use change_record_io::{ChangeRecordReader, ChangeRecordWriter};
pub use changelog_writer::{ChangelogWriteResult, ChangelogWriter};
pub use git_provider::GitProvider;
pub use interaction::{BumpSelection, DescriptionInput, InteractionProvider, PackageSelection};
pub use manifest_writer::{ManifestUpdate, ManifestWriter};
pub use project_provider::ProjectProvider;
