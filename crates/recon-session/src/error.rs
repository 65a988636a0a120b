//! Error taxonomy for edit sessions
//!
//! Three recoverable failure classes: field-level validation (blocks
//! write-back until resolved), missing preconditions (nothing is mutated),
//! and transport failures (session state is preserved for retry).

/// Failures crossing the external network boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP-like status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Main session error type.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A field value was rejected; surfaced inline at the offending field
    /// and write-back stays blocked until resolved.
    #[error("validation failed for '{field}': {reason}")]
    Validation {
        /// Wire name of the offending field.
        field: &'static str,
        /// Human-readable rejection reason.
        reason: String,
    },

    /// An operation required a loaded base document; nothing was mutated.
    #[error("no base configuration document loaded")]
    MissingBaseDocument,

    /// The job id is not part of this session.
    #[error("job {0} is not part of this session")]
    JobNotFound(i64),

    /// Transport failure; local edit state is preserved so the caller can
    /// retry without re-entering data.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Shorthand for a field validation failure.
    #[inline]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether retrying the same operation can succeed without changing
    /// the session's inputs.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
