use std::path::Path;

use cascade_manifest::ManifestDocument;
use tracing::debug;

use crate::Result;
use crate::traits::{ManifestUpdate, ManifestWriter};

pub struct FileSystemManifestWriter;

impl FileSystemManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter for FileSystemManifestWriter {
    fn apply(&self, manifest_path: &Path, update: &ManifestUpdate) -> Result<bool> {
        let mut document = ManifestDocument::open(manifest_path)?;

        if let Some(version) = &update.package_version {
            document.set_package_version(version)?;
        }
        for (name, version) in &update.dependencies {
            document.set_dependency_version(name, version);
        }

        let written = document.save()?;
        if written {
            debug!(path = %manifest_path.display(), "updated manifest");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use semver::Version;

    use super::*;

    #[test]
    fn applies_package_and_dependency_versions_together() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            r#"[package]
name = "app"
version = "2.1.0" # keep this comment

[dependencies]
core = { path = "../core", version = "1.0.0" }
"#,
        )?;

        let update = ManifestUpdate {
            package_version: Some(Version::new(2, 1, 1)),
            dependencies: vec![("core".to_string(), Version::new(1, 1, 0))],
        };

        let written = FileSystemManifestWriter::new().apply(&path, &update)?;
        let content = fs::read_to_string(&path)?;

        assert!(written);
        assert!(content.contains(r#"version = "2.1.1""#));
        assert!(content.contains(r#"version = "1.1.0""#));
        assert!(content.contains("# keep this comment"));
        Ok(())
    }

    #[test]
    fn unrelated_dependencies_leave_file_untouched() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Cargo.toml");
        let original = "[package]\nname = \"app\"\nversion = \"1.0.0\"\n";
        fs::write(&path, original)?;

        let update = ManifestUpdate {
            package_version: None,
            dependencies: vec![("core".to_string(), Version::new(3, 0, 0))],
        };

        let written = FileSystemManifestWriter::new().apply(&path, &update)?;

        assert!(!written);
        assert_eq!(fs::read_to_string(&path)?, original);
        Ok(())
    }
}
