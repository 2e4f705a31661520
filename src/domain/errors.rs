use thiserror::Error;

/// A transport call that raised instead of returning a status.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no Bluetooth LE transport is available on this platform")]
    Unavailable,
    #[error("{operation} failed: {message}")]
    Platform {
        operation: &'static str,
        message: String,
    },
}

impl TransportError {
    pub fn platform(operation: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Platform {
            operation,
            message: error.to_string(),
        }
    }
}

/// Rejected device name / MAC input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("device name must not be empty")]
    EmptyName,
    #[error("device MAC `{0}` must be 12 hex digits, optionally colon separated")]
    InvalidMac(String),
}
