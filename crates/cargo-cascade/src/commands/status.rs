use std::path::Path;

use cascade_operations::operations::StatusOperation;
use cascade_operations::providers::{FileSystemChangeRecordIO, FileSystemProjectProvider};

use super::StatusArgs;
use crate::error::Result;
use crate::output::{PlainTextStatusFormatter, StatusFormatter};

pub(super) fn run(args: &StatusArgs, start_path: &Path) -> Result<()> {
    let operation =
        StatusOperation::new(FileSystemProjectProvider::new(), FileSystemChangeRecordIO::new());
    let output = operation.execute(start_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", PlainTextStatusFormatter.format_status(&output));
    }

    Ok(())
}
