use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Required tools are missing: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("Failed to create report directory: {path}")]
    LayoutCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git clone failed for {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Command failed: {command} (exit status {status})")]
    CommandFailed { command: String, status: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
