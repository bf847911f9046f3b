use std::collections::HashMap;
use std::io::Read as _;
use std::path::Path;

use cascade_core::BumpType;
use cascade_operations::operations::{AddInput, AddOperation, AddResult};
use cascade_operations::providers::{FileSystemChangeRecordIO, FileSystemProjectProvider};

use super::AddArgs;
use crate::environment::is_interactive;
use crate::error::{CliError, Result};
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub(super) fn run(args: AddArgs, start_path: &Path) -> Result<()> {
    let input = build_input(&args)?;
    let project_provider = FileSystemProjectProvider::new();
    let record_writer = FileSystemChangeRecordIO::new();

    let result = if is_interactive() {
        AddOperation::new(
            project_provider,
            record_writer,
            TerminalInteractionProvider::new(args.editor),
        )
        .execute(start_path, input)?
    } else {
        AddOperation::new(project_provider, record_writer, NonInteractiveProvider)
            .execute(start_path, input)?
    };

    match result {
        AddResult::Created { record, file_path } => {
            println!("Created change record: {}", file_path.display());
            println!();
            for release in &record.releases {
                println!("  {}: {}", release.name, release.bump_type);
            }
            println!();
            println!("{}", record.summary);
        }
        AddResult::Cancelled => println!("Cancelled."),
        AddResult::NoPackages => println!("No packages selected, nothing recorded."),
    }
    Ok(())
}

fn build_input(args: &AddArgs) -> Result<AddInput> {
    let parsed = args
        .package_bumps
        .iter()
        .map(|input| parse_package_bump(input))
        .collect::<Result<Vec<_>>>()?;

    let description = match args.message.as_deref() {
        Some("-") => Some(read_description_from_stdin()?),
        Some(message) => Some(message.to_string()),
        None => None,
    };

    Ok(AddInput {
        packages: parsed.iter().map(|(name, _)| name.clone()).collect(),
        bump: None,
        package_bumps: parsed.into_iter().collect::<HashMap<_, _>>(),
        description,
    })
}

fn parse_package_bump(input: &str) -> Result<(String, BumpType)> {
    let Some((name, bump)) = input.split_once(':') else {
        return Err(CliError::InvalidPackageBumpFormat {
            input: input.to_string(),
        });
    };
    if name.is_empty() {
        return Err(CliError::InvalidPackageBumpFormat {
            input: input.to_string(),
        });
    }
    Ok((name.to_string(), bump.parse()?))
}

fn read_description_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
