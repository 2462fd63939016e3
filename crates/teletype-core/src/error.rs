//! Shared error type across TeleType crates.

use thiserror::Error;

/// Stable error codes, used in logs and test vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input.
    BadRequest,
    /// Inbound frame could not be decoded as an envelope.
    Decode,
    /// Configuration is missing, malformed, or out of range.
    Config,
    /// Connection could not be established or was lost.
    Transport,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Decode => "DECODE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TeletypeError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum TeletypeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("config: {0}")]
    Config(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TeletypeError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TeletypeError::BadRequest(_) => ErrorCode::BadRequest,
            TeletypeError::Decode(_) => ErrorCode::Decode,
            TeletypeError::Config(_) => ErrorCode::Config,
            TeletypeError::Transport(_) => ErrorCode::Transport,
            TeletypeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TeletypeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
