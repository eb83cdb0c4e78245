//! CLI-level errors (wraps settings and I/O errors)

use thiserror::Error;

use crate::config::SettingsError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Settings(e) => match e {
                SettingsError::Invalid { .. } => crate::exitcode::DATAERR,
                SettingsError::Load(_) => crate::exitcode::CONFIG,
                SettingsError::Render(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), 64);
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(CliError::from(io).exit_code(), 74);
        let invalid = SettingsError::Invalid {
            key: "demo.count",
            reason: "must be at least 1".into(),
        };
        assert_eq!(CliError::from(invalid).exit_code(), 65);
    }
}
