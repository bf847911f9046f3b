use std::path::Path;

use cascade_operations::operations::{VersionInput, VersionOperation};
use cascade_operations::providers::{
    FileSystemChangeRecordIO, FileSystemChangelogWriter, FileSystemManifestWriter,
    FileSystemProjectProvider, Git2Provider,
};
use cascade_operations::traits::ProjectProvider;

use super::VersionArgs;
use crate::error::Result;
use crate::output::format_outcome;

pub(super) fn run(args: &VersionArgs, start_path: &Path) -> Result<()> {
    let project_provider = FileSystemProjectProvider::new();
    let root = project_provider.discover_project(start_path)?.root;

    let operation = VersionOperation::new(
        project_provider,
        FileSystemChangeRecordIO::new(),
        FileSystemManifestWriter::new(),
        FileSystemChangelogWriter::new(),
        Git2Provider::new(),
    );
    let input = VersionInput {
        dry_run: args.dry_run,
        no_commit: args.no_commit,
        ..VersionInput::default()
    };

    let outcome = operation.execute(start_path, &input)?;
    print!("{}", format_outcome(&outcome, &root));

    Ok(())
}
