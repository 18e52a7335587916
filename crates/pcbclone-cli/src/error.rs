use std::fmt;
use std::process::ExitCode;

use pcbclone_board::BoardError;
use pcbclone_layout::{CloneError, ConfigError};

/// Process exit status of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad flags or arguments, reported by clap.
    Usage = 1,
    /// The board or clone config could not be read or is invalid.
    Input = 2,
    /// The clone run aborted, or its results could not be written.
    Processing = 3,
}

impl ErrorCode {
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Input, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Processing, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Reading or parsing the board is an input problem; writing it back is not.
impl From<BoardError> for CliError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Write { .. } => CliError::processing(err.to_string()),
            other => CliError::input(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::input(err.to_string())
    }
}

impl From<CloneError> for CliError {
    fn from(err: CloneError) -> Self {
        match err {
            CloneError::Config(e) => e.into(),
            other => CliError::processing(other.to_string()),
        }
    }
}
