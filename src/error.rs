use std::path::PathBuf;

/// Errors from turning user text into a target word.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("target text '{0}' contains no letters")]
    NoLetters(String),
}

/// Errors from the byte transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to open serial port {port} at {baud_rate} baud: {source}")]
    Open {
        port: String,
        baud_rate: u32,
        source: serialport::Error,
    },

    #[error("failed to list serial ports: {0}")]
    ListPorts(#[source] serialport::Error),

    #[error("failed to read replay file {path}: {source}")]
    ReplayRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport closed")]
    Closed,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
