/**
 * Bridge error types
 * Scanner failures, argument validation and session lifecycle
 */

use thiserror::Error;

/// Failure reported by the scanner capability.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("{operation} failed with code {code}")]
    Sdk { operation: &'static str, code: i32 },

    #[error("Scanner unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid capture: {0}")]
    InvalidCapture(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing argument: {0}")]
    Missing(&'static str),

    #[error("Arguments must be a map")]
    NotAMap,

    #[error("Argument {name} must be a {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Anything that turns a command into an error envelope.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Failed to encode response: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Bridge is already attached")]
    AlreadyAttached,

    #[error("Bridge is not attached")]
    NotAttached,
}
