//! CLI-specific error types and exit code mapping

use scanpost_core::error::{ConfigError, ReportError, ScanpostError};
use scanpost_publisher::PublisherError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Report decoding or re-encoding failure.
    #[error("{0}")]
    Report(#[from] ReportError),

    /// Publishing to the broker failed.
    #[error("{0}")]
    Publish(#[from] PublisherError),

    /// An internal step failed (e.g. the publish task could not be joined).
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdin read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from scanpost-core.
    #[error("{0}")]
    Core(#[from] ScanpostError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 3    | Report decode / encode error     |
    /// | 4    | Publish error                    |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Report(_) => 3,
            Self::Publish(PublisherError::Config { .. }) => 2,
            Self::Publish(_) => 4,
            Self::Io(_) => 10,
            Self::Core(inner) => match inner {
                ScanpostError::Config(_) => 2,
                ScanpostError::Report(_) => 3,
                ScanpostError::Io(_) => 10,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
