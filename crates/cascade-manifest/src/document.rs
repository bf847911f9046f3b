use std::path::{Path, PathBuf};

use semver::Version;
use toml_edit::{DocumentMut, Item, TableLike, value};
use tracing::debug;

use crate::error::ManifestError;
use crate::requirement::rewrite_requirement;

const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

/// A parsed manifest that batches edits and writes them back once, keeping
/// comments and formatting.
#[derive(Debug)]
pub struct ManifestDocument {
    path: PathBuf,
    doc: DocumentMut,
    dirty: bool,
}

impl ManifestDocument {
    /// # Errors
    ///
    /// Returns `ManifestError::Read` or `ManifestError::Parse`.
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        Ok(Self {
            path: path.to_path_buf(),
            doc: read_document(path)?,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once any edit changed the document.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets `package.version`. An inherited `version.workspace = true` is
    /// replaced by the literal version.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingField` if there is no `[package]` table.
    pub fn set_package_version(&mut self, version: &Version) -> Result<(), ManifestError> {
        let package = self
            .doc
            .get_mut("package")
            .and_then(Item::as_table_like_mut)
            .ok_or_else(|| ManifestError::MissingField {
                path: self.path.clone(),
                field: "package".to_string(),
            })?;

        package.insert("version", value(version.to_string()));
        debug!(path = %self.path.display(), %version, "set package version");
        self.dirty = true;
        Ok(())
    }

    /// Rewrites the version requirement of every entry depending on
    /// `package_name`, across `[workspace.dependencies]`, the normal, dev and
    /// build sections, and their `[target.*]` variants. Entries are matched
    /// by key or by their `package` rename. Entries inheriting from the
    /// workspace or without a `version` key are left alone.
    ///
    /// Returns whether any entry changed.
    pub fn set_dependency_version(&mut self, package_name: &str, version: &Version) -> bool {
        let mut changed = false;

        if let Some(deps) = self
            .doc
            .get_mut("workspace")
            .and_then(|ws| ws.get_mut("dependencies"))
            .and_then(Item::as_table_like_mut)
        {
            changed |= update_section(deps, package_name, version);
        }

        for section in DEPENDENCY_SECTIONS {
            if let Some(deps) = self.doc.get_mut(section).and_then(Item::as_table_like_mut) {
                changed |= update_section(deps, package_name, version);
            }
        }

        if let Some(targets) = self.doc.get_mut("target").and_then(Item::as_table_like_mut) {
            for (_, target) in targets.iter_mut() {
                for section in DEPENDENCY_SECTIONS {
                    if let Some(deps) = target.get_mut(section).and_then(Item::as_table_like_mut) {
                        changed |= update_section(deps, package_name, version);
                    }
                }
            }
        }

        if changed {
            debug!(
                path = %self.path.display(),
                dependency = package_name,
                %version,
                "rewrote dependency requirement"
            );
        }
        self.dirty |= changed;
        changed
    }

    /// Writes the document if it was edited. Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Write` if the file cannot be written.
    pub fn save(&mut self) -> Result<bool, ManifestError> {
        if !self.dirty {
            return Ok(false);
        }
        std::fs::write(&self.path, self.doc.to_string()).map_err(|source| {
            ManifestError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        self.dirty = false;
        debug!(path = %self.path.display(), "wrote manifest");
        Ok(true)
    }
}

fn read_document(path: &Path) -> Result<DocumentMut, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .parse::<DocumentMut>()
        .map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn update_section(deps: &mut dyn TableLike, package_name: &str, version: &Version) -> bool {
    let mut changed = false;

    for (key, entry) in deps.iter_mut() {
        let Some(table) = entry.as_table_like_mut() else {
            continue;
        };

        let target = table
            .get("package")
            .and_then(Item::as_str)
            .unwrap_or(key.get());
        if target != package_name {
            continue;
        }

        let inherits = table
            .get("workspace")
            .and_then(Item::as_bool)
            .unwrap_or(false);
        if inherits {
            continue;
        }

        let Some(old) = table.get("version").and_then(Item::as_str) else {
            continue;
        };
        let new = rewrite_requirement(old, version);
        if new != old {
            table.insert("version", value(new));
            changed = true;
        }
    }

    changed
}
