// Custom Error types live here

use std::{io, path::PathBuf};

use thiserror::Error;

/// Rejected operator input. Shown on the status line, never fatal.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Please enter a value")]
    Blank,
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
    #[error("Choose a number from 1 to {count}, not {choice}")]
    OutOfRange { choice: usize, count: usize },
    #[error("Invalid song \"{0}\", expected ARTIST|TITLE|MEDIA")]
    MalformedSong(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("Could not create log file {path:?}: {source}")]
    LogFile { path: PathBuf, source: io::Error },
    #[error("Could not initialize logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_io_error_converts() {
        let error: AppError = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert!(matches!(error, AppError::Terminal(_)));
        assert_eq!(error.to_string(), "Terminal error: stdout closed");
    }
}
