use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Magnitude of a semantic-version change.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `None < Patch < Minor < Major`; combining competing requests is always
/// `max`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    #[value(skip)]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid bump type '{0}' (expected patch, minor or major)")]
pub struct ParseBumpTypeError(pub String);

impl FromStr for BumpType {
    type Err = ParseBumpTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(ParseBumpTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    pub bump_type: BumpType,
}

impl PackageRelease {
    #[must_use]
    pub fn new(name: impl Into<String>, bump_type: BumpType) -> Self {
        Self {
            name: name.into(),
            bump_type,
        }
    }
}

/// A single authored note requesting bumps for one or more packages.
///
/// The `id` is the file stem of the record on disk; the summary is opaque to
/// version resolution and only travels to the changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: String,
    pub releases: Vec<PackageRelease>,
    pub summary: String,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        releases: Vec<PackageRelease>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            releases,
            summary: summary.into(),
        }
    }
}

/// Snapshot of one package taken at the start of a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: Version,
    /// Names of packages this one depends on. Names outside the workspace are
    /// kept here and ignored during propagation.
    pub dependencies: BTreeSet<String>,
    pub path: PathBuf,
}

impl PackageDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            dependencies: BTreeSet::new(),
            path: PathBuf::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("Cargo.toml")
    }
}
