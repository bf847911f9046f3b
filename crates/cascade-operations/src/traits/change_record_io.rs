use std::path::{Path, PathBuf};

use cascade_core::{ChangeRecord, PackageRelease};

use crate::Result;

pub trait ChangeRecordReader: Send + Sync {
    /// Paths of every `*.md` record in `dir`, sorted by file name. A missing
    /// directory holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_change_records(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads one record; its id is the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn read_change_record(&self, path: &Path) -> Result<ChangeRecord>;
}

pub trait ChangeRecordWriter: Send + Sync {
    /// Writes a new record under a generated name and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn write_change_record(
        &self,
        dir: &Path,
        releases: Vec<PackageRelease>,
        summary: &str,
    ) -> Result<(PathBuf, ChangeRecord)>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_change_record(&self, path: &Path) -> Result<()>;
}
