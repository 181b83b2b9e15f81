//! Error types for command construction, delivery and configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("device serial id is missing")]
    MissingDeviceId,

    #[error("device token is missing")]
    MissingToken,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to Nabaztag API failed")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Nabaztag API returned status {0}")]
    Status(u16),

    #[error("failed to read Nabaztag API response")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("invalid device command: {0}")]
    Command(#[from] CommandError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}
