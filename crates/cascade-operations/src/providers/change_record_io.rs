use std::fs;
use std::path::{Path, PathBuf};

use cascade_core::{ChangeRecord, PackageRelease};
use cascade_parse::{parse_change_record, serialize_change_record};
use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangeRecordReader, ChangeRecordWriter};

const MAX_FILENAME_ATTEMPTS: usize = 100;
const RECORD_EXTENSION: &str = "md";

/// Change records stored as `<id>.md` files in the changeset directory.
pub struct FileSystemChangeRecordIO;

impl FileSystemChangeRecordIO {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangeRecordIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeRecordReader for FileSystemChangeRecordIO {
    fn list_change_records(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OperationError::ChangeRecordList {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangeRecordList {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                records.push(path);
            }
        }

        records.sort();
        Ok(records)
    }

    fn read_change_record(&self, path: &Path) -> Result<ChangeRecord> {
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| OperationError::InvalidChangeRecordPath(path.to_path_buf()))?;

        let content =
            fs::read_to_string(path).map_err(|source| OperationError::ChangeRecordRead {
                path: path.to_path_buf(),
                source,
            })?;

        parse_change_record(id, &content).map_err(|source| OperationError::ChangeRecordParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ChangeRecordWriter for FileSystemChangeRecordIO {
    fn write_change_record(
        &self,
        dir: &Path,
        releases: Vec<PackageRelease>,
        summary: &str,
    ) -> Result<(PathBuf, ChangeRecord)> {
        let id = generate_unique_id(dir);
        let record = ChangeRecord::new(id, releases, summary);
        let content = serialize_change_record(&record)?;

        let path = dir.join(format!("{}.{RECORD_EXTENSION}", record.id));
        fs::write(&path, content).map_err(|source| OperationError::ChangeRecordWrite {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote change record");

        Ok((path, record))
    }

    fn remove_change_record(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| OperationError::ChangeRecordRemove {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "removed change record");
        Ok(())
    }
}

fn generate_unique_id(dir: &Path) -> String {
    for _ in 0..MAX_FILENAME_ATTEMPTS {
        if let Some(name) = petname::petname(3, "-") {
            if !dir.join(format!("{name}.{RECORD_EXTENSION}")).exists() {
                return name;
            }
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("change-{timestamp}")
}
