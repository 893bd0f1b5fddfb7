//! Error types for cluster lifecycle management.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

use crate::control::Operation;

/// Cluster lifecycle errors.
#[derive(Error, Debug)]
pub enum Error {
    /// A cluster is already installed.
    #[error("Shared cluster already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// No cluster has been installed yet.
    #[error("Shared cluster does not exist")]
    NotFound,

    /// The control program failed to install the cluster.
    #[error("Failed to install cluster at {path}: {source}")]
    Installation {
        path: PathBuf,
        #[source]
        source: CommandError,
    },

    /// The control program failed to start, stop or kill the cluster.
    #[error("Failed to {operation} cluster at {path}: {source}")]
    Control {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: CommandError,
    },

    /// A start report line did not have exactly three fields.
    #[error(
        "Wrong start command output. Expected to have 'http_uri member_uri path' in line '{line}'"
    )]
    MalformedTopology { line: String },

    /// A start report line carried a URI that does not parse.
    #[error("Invalid URI '{uri}' in start command output line '{line}': {source}")]
    InvalidMemberUri {
        line: String,
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// The start report named no members.
    #[error("No cluster members")]
    EmptyTopology,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Failure of a single control program invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be launched.
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("'{command}' failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The program wrote something other than UTF-8 to stdout.
    #[error("'{command}' produced non UTF-8 output")]
    InvalidOutput { command: String },
}

/// Result type for cluster operations.
pub type Result<T> = std::result::Result<T, Error>;
