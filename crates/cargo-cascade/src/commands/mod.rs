mod add;
mod status;
mod version;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Record a change for one or more packages
    Add(AddArgs),
    /// Show the releases the pending change records would produce
    Status(StatusArgs),
    /// Apply pending change records: bump versions, write changelogs, commit
    Version(VersionArgs),
}

#[derive(Args)]
pub(crate) struct AddArgs {
    /// Package to include, as NAME:BUMP (repeatable)
    #[arg(long = "package", short = 'p', value_name = "NAME:BUMP")]
    pub package_bumps: Vec<String>,

    /// Summary of the change ("-" reads it from stdin)
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Write the summary in $VISUAL / $EDITOR instead of a single-line prompt
    #[arg(long, conflicts_with = "message")]
    pub editor: bool,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct VersionArgs {
    /// Print what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not stage, commit or tag even if the configuration asks for it
    #[arg(long)]
    pub no_commit: bool,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Add(args) => add::run(args, start_path),
            Self::Status(args) => status::run(&args, start_path),
            Self::Version(args) => version::run(&args, start_path),
        }
    }
}
