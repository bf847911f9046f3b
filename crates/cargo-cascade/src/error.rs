use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] cascade_operations::OperationError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid --package value '{input}': expected NAME:BUMP")]
    InvalidPackageBumpFormat { input: String },

    #[error(transparent)]
    InvalidBumpType(#[from] cascade_core::ParseBumpTypeError),

    #[error("failed to encode status as JSON")]
    Json(#[from] serde_json::Error),

    #[error("editor failed")]
    EditorFailed {
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
