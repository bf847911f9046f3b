use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] cascade_git::GitError),

    #[error(transparent)]
    Project(#[from] cascade_project::ProjectError),

    #[error(transparent)]
    Format(#[from] cascade_parse::FormatError),

    #[error(transparent)]
    Manifest(#[from] cascade_manifest::ManifestError),

    #[error(transparent)]
    Changelog(#[from] cascade_changelog::ChangelogError),

    #[error("failed to read change record '{path}'")]
    ChangeRecordRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse change record '{path}'")]
    ChangeRecordParse {
        path: PathBuf,
        #[source]
        source: cascade_parse::FormatError,
    },

    #[error("failed to write change record '{path}'")]
    ChangeRecordWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove change record '{path}'")]
    ChangeRecordRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list change records in '{path}'")]
    ChangeRecordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid change record path '{0}'")]
    InvalidChangeRecordPath(PathBuf),

    #[error("no packages found in project at '{0}'")]
    EmptyProject(PathBuf),

    #[error("unknown package '{name}' (available: {available})")]
    UnknownPackage { name: String, available: String },

    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("no terminal available; pass packages with --package and a description with --message")]
    InteractionRequired,

    #[error("interactive prompt failed")]
    Interaction {
        #[source]
        source: std::io::Error,
    },

    #[error("no bump type given for package '{package_name}'; use --package {package_name}:<bump>")]
    MissingBumpType { package_name: String },

    #[error("working tree has uncommitted changes; commit or stash them, or use --no-commit")]
    DirtyWorkingTree,
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_error_includes_path() {
        let err = OperationError::EmptyProject(PathBuf::from("/my/project"));

        assert!(err.to_string().contains("/my/project"));
    }

    #[test]
    fn unknown_package_error_includes_name_and_available() {
        let err = OperationError::UnknownPackage {
            name: "missing".to_string(),
            available: "foo, bar".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.contains("missing"));
        assert!(msg.contains("foo, bar"));
    }

    #[test]
    fn parse_error_keeps_source() {
        use std::error::Error as _;

        let source = cascade_parse::parse_change_record("broken", "no front matter")
            .expect_err("content without front matter is rejected");
        let err = OperationError::ChangeRecordParse {
            path: PathBuf::from(".changeset/broken.md"),
            source,
        };

        assert!(err.to_string().contains(".changeset/broken.md"));
        assert!(err.source().is_some());
    }
}
