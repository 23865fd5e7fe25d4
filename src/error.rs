use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the release service or the transport in front of it.
/// Nothing here is retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to reach the release service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{action} failed (HTTP {status}): {body}")]
    Rejected {
        action: String,
        status: u16,
        body: String,
    },
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write archive {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Packaging task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A command-level failure. Every variant terminates the current command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid format:  {0}.")]
    InvalidFormat(String),
    #[error("App \"{0}\" does not exist.")]
    AppNotFound(String),
    #[error("Deployment \"{deployment}\" does not exist for app \"{app}\".")]
    DeploymentNotFound { deployment: String, app: String },
    #[error("Access key \"{0}\" does not exist.")]
    AccessKeyNotFound(String),
    #[error("You are not logged in.")]
    NotLoggedIn,
    #[error("You are not logged in.")]
    SessionRejected(#[source] ServiceError),
    #[error("Invalid access token.")]
    InvalidAccessToken,
    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),
    #[error("Prompt aborted.")]
    PromptAborted,
    #[error("Failed to persist session to '{path}': {source}")]
    SessionWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode output: {0}")]
    Render(#[from] serde_json::Error),
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
