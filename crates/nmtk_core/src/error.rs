//! Shell-level errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::shell::ShellState;

/// Shell-level errors
#[derive(Error, Debug)]
pub enum ShellError {
    /// Window, graphics context or UI layer could not be created
    #[error("Shell initialization failed: {0}")]
    InitializationFailed(String),

    /// Windowing layer error after initialization
    #[error("Platform error: {0}")]
    Platform(String),

    /// Graphics API error
    #[error("Graphics error: {0}")]
    Graphics(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Operation not valid in the current lifecycle state
    #[error("Invalid shell state: expected {expected:?}, found {found:?}")]
    InvalidState {
        /// State the operation requires
        expected: ShellState,
        /// State the shell was in
        found: ShellState,
    },
}
