//! Error types for the pcindex CLI

use pinecone_index::IndexError;
use thiserror::Error;

use crate::cli::ExitCode;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Raised by the index client
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Input file missing or unreadable
    #[error("Cannot read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed flag value or file content
    #[error("Invalid input: {0}")]
    Input(String),

    /// Result could not be written
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        CliError::Input(msg.into())
    }

    /// Exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Index(e) if e.is_user_error() => ExitCode::InvalidInput,
            CliError::Index(IndexError::Runtime(_)) => ExitCode::InternalError,
            CliError::Index(_) => ExitCode::RemoteError,
            CliError::File { .. } => ExitCode::FileError,
            CliError::Input(_) => ExitCode::InvalidInput,
            CliError::Output(_) => ExitCode::InternalError,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            CliError::from(IndexError::ambiguous("x")).exit_code(),
            ExitCode::InvalidInput
        );
        assert_eq!(
            CliError::from(IndexError::from_status(401, "")).exit_code(),
            ExitCode::RemoteError
        );
        assert_eq!(
            CliError::from(IndexError::Timeout("slow".into())).exit_code(),
            ExitCode::RemoteError
        );
        assert_eq!(
            CliError::from(IndexError::Runtime("pool".into())).exit_code(),
            ExitCode::InternalError
        );
        assert_eq!(CliError::input("bad").exit_code(), ExitCode::InvalidInput);
        assert_eq!(
            CliError::File {
                path: "v.json".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .exit_code(),
            ExitCode::FileError
        );
    }
}
