//! Error types for the waitlist funnel.

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Funnel error: {0}")]
    Funnel(#[from] FunnelError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the onboarding flow and the dashboard actions.
///
/// All of them are recoverable: none leaves a session in a broken state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunnelError {
    /// Email is empty or does not look like an address. Shown inline.
    #[error("Please enter a valid email address")]
    InvalidEmailFormat,

    #[error("Onboarding is not complete: follow on Twitter and join Discord first")]
    NotReady,

    #[error("Onboarding was already submitted")]
    AlreadySubmitted,

    #[error("Action {action} is not available on the {view} view")]
    WrongView { action: String, view: String },

    /// Clipboard write was refused (usually a permission problem).
    #[error("Failed to write to clipboard: {reason}")]
    ClipboardWriteFailure { reason: String },
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },

    #[error("Invalid session id: {0}")]
    InvalidId(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
