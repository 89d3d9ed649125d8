use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpmError {
    /// Non-2xx response from the registry or raw-content host
    #[error("{status} response ({url})")]
    RemoteFetch { status: u16, url: String },

    /// Transport-level failure (DNS, TLS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid manifest at '{url}': {source}")]
    ManifestParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Failed to unpack archive: {0}")]
    ArchiveExtraction(String),

    #[error("Build command failed: {0}")]
    BuildCommand(String),

    #[error("Failed to write '{path}': {source}")]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry index error: {0}")]
    Registry(String),

    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CpmError>;
