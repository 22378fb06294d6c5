//! Error handling for the ytmbridge CLI
//!
//! Every failure surfaced to the user falls into one of a few kinds:
//! upstream metadata-service faults, download-utility faults, local
//! filesystem trouble, invalid input, and internal errors. `main` returns
//! `Result<()>`, so any of these terminates the process with a non-zero
//! status and a diagnostic on stderr.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Upstream service error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Download utility error: {0}")]
    Downloader(#[from] DownloaderError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Faults of the metadata collaborator: network failures, non-2xx
/// responses, payloads missing the structure we navigate.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response shape: {reason}")]
    InvalidResponse { reason: String },

    #[error("no result for id: {id}")]
    NotFound { id: String },
}

#[derive(Error, Debug)]
pub enum DownloaderError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("child process had no stdout handle")]
    NoStdout,
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Internal(err.into())
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Upstream(UpstreamError::Http(err))
    }
}
