//! Application-level error carrying the process exit code.
//!
//! Exit codes:
//! - `2` configuration or local I/O (no source configured, export failures)
//! - `3` no usable data (every row rejected, or the range is empty)
//! - `4` acquisition (HTTP or unreadable source file) and terminal failures

use thiserror::Error;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_NO_DATA: u8 = 3;
pub const EXIT_UNAVAILABLE: u8 = 4;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_DATA, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(EXIT_UNAVAILABLE, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}
