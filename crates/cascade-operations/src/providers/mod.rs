mod change_record_io;
mod changelog;
mod git;
mod manifest;
mod project;

pub use change_record_io::FileSystemChangeRecordIO;
pub use changelog::FileSystemChangelogWriter;
pub use git::Git2Provider;
pub use manifest::FileSystemManifestWriter;
pub use project::FileSystemProjectProvider;
