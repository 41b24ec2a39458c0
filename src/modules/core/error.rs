//! Error types for tabsmith

use thiserror::Error;

/// Main error type for tabsmith operations
#[derive(Error, Debug)]
pub enum TabsmithError {
    /// Malformed or missing required input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two options of one command declare the same alias
    #[error("Duplicate option '{option}' in command '{command}'")]
    DuplicateOption { command: String, option: String },

    /// Command model that cannot be turned into a safe script
    #[error("Invalid command model: {0}")]
    InvalidCommandModel(String),

    /// Model file reading or parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model file validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Output file already present and overwriting was not requested
    #[error("{0} exists. Specify -f to overwrite.")]
    FileExists(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TabsmithError {
    /// Returns true if this error describes a defect of the command model itself
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            TabsmithError::DuplicateOption { .. }
                | TabsmithError::InvalidCommandModel(_)
                | TabsmithError::Validation(_)
        )
    }

    /// Returns the process exit status (sysexits.h) for this error
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            TabsmithError::InvalidArgument(_) => exitcode::USAGE,
            TabsmithError::DuplicateOption { .. }
            | TabsmithError::InvalidCommandModel(_)
            | TabsmithError::Validation(_)
            | TabsmithError::Json(_) => exitcode::DATAERR,
            TabsmithError::Config(_) => exitcode::CONFIG,
            TabsmithError::FileExists(_) => exitcode::CANTCREAT,
            TabsmithError::Io(_) => exitcode::IOERR,
            TabsmithError::Internal(_) => exitcode::SOFTWARE,
        }
    }
}

/// Result type alias using TabsmithError
pub type Result<T> = std::result::Result<T, TabsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(TabsmithError::InvalidArgument("x".into()).exit_code(), 64);
        assert_eq!(TabsmithError::InvalidCommandModel("x".into()).exit_code(), 65);
        assert_eq!(TabsmithError::FileExists("x".into()).exit_code(), 73);
        assert_eq!(TabsmithError::Config("x".into()).exit_code(), 78);
    }

    #[test]
    fn test_error_messages() {
        let err = TabsmithError::DuplicateOption {
            command: "demo".into(),
            option: "-h".into(),
        };
        assert_eq!(err.to_string(), "Duplicate option '-h' in command 'demo'");

        let err = TabsmithError::FileExists("/tmp/demo_completion".into());
        assert_eq!(
            err.to_string(),
            "/tmp/demo_completion exists. Specify -f to overwrite."
        );
    }

    #[test]
    fn test_error_is_model_error() {
        assert!(TabsmithError::InvalidCommandModel("root".into()).is_model_error());
        assert!(TabsmithError::Validation("name".into()).is_model_error());
        assert!(!TabsmithError::InvalidArgument("aliases".into()).is_model_error());
        assert!(!TabsmithError::Config("bad yaml".into()).is_model_error());
    }
}
