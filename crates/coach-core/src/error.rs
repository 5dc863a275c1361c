//! Error types for the Goethe Coach core.
//!
//! This module defines the error hierarchy for all core operations,
//! including configuration loading, oracle calls, and the mode state
//! machine.

/// A specialized `Result` type for Goethe Coach core operations.
pub type Result<T> = std::result::Result<T, CoachError>;

/// Errors that can occur while running a coaching session.
///
/// Error variants are organized by subsystem and include actionable
/// suggestions where possible to help users resolve issues.
///
/// Two situations that are deliberately *not* errors:
///
/// - Oracle output without a recognizable `SCORE:`/`LEVEL:` tag: the
///   parser returns [`crate::Feedback`] with an `Unknown` signal and the
///   session continues.
/// - Invalid menu/level input: input boundaries recover by falling back
///   to a documented default with a warning.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Missing or invalid configuration (most commonly the API key).
    ///
    /// Fatal at startup: no mode may run before this is resolved.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Oracle Errors
    // ========================================================================
    /// The remote completion call failed (network, auth, quota).
    ///
    /// Recoverable at the session level: the current exercise iteration is
    /// aborted without any statistics increment, and control returns to the
    /// nearest menu. Never retried automatically.
    #[error("Oracle unavailable ({kind}): {message}\n\nSuggestion: {suggestion}")]
    OracleUnavailable {
        /// The kind of oracle failure (e.g., rate limit, authentication).
        kind: OracleErrorKind,
        /// Detailed error message from the completion service.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // State Machine Errors
    // ========================================================================
    /// Invalid state transition attempted within a mode loop.
    #[error("Invalid state transition: cannot go from {from} to {to}")]
    InvalidStateTransition {
        /// The current state.
        from: String,
        /// The attempted target state.
        to: String,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error (reading user input, writing reports).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Categories of oracle failures for structured error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleErrorKind {
    /// Authentication failure (invalid API key, expired credentials).
    Authentication,
    /// Rate limit or quota exceeded.
    RateLimit,
    /// Server error (5xx responses).
    Server,
    /// Network connectivity issues.
    Network,
    /// Other unclassified errors.
    Other,
}

impl std::fmt::Display for OracleErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimit => write!(f, "rate_limit"),
            Self::Server => write!(f, "server"),
            Self::Network => write!(f, "network"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl OracleErrorKind {
    /// Returns a suggestion message for this error kind.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Authentication => "Check your OPENAI_API_KEY",
            Self::RateLimit => "Wait a moment and try the exercise again",
            Self::Server => "Retry later; the completion service may be experiencing issues",
            Self::Network => "Check your network connection",
            Self::Other => "Check the completion provider's status page",
        }
    }
}

impl CoachError {
    /// Creates a new `Configuration` error with the given message and suggestion.
    #[must_use]
    pub fn configuration(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `OracleUnavailable` error with automatic suggestion
    /// based on the error kind.
    #[must_use]
    pub fn oracle_unavailable(kind: OracleErrorKind, message: impl Into<String>) -> Self {
        let suggestion = kind.suggestion().to_string();
        Self::OracleUnavailable {
            kind,
            message: message.into(),
            suggestion,
        }
    }

    /// Creates a new `InvalidStateTransition` error.
    #[must_use]
    pub fn invalid_transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Returns `true` if this error is transient and a later attempt may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::OracleUnavailable {
                kind: OracleErrorKind::RateLimit | OracleErrorKind::Server | OracleErrorKind::Network,
                ..
            }
        )
    }

    /// Returns `true` if this error is fatal and the session should end.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::OracleUnavailable {
                    kind: OracleErrorKind::Authentication,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = CoachError::configuration(
            "OPENAI_API_KEY is not set",
            "Export OPENAI_API_KEY or add it to a .env file",
        );
        let msg = err.to_string();
        assert!(msg.contains("OPENAI_API_KEY is not set"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_oracle_error_kind_display() {
        assert_eq!(OracleErrorKind::RateLimit.to_string(), "rate_limit");
        assert_eq!(OracleErrorKind::Authentication.to_string(), "authentication");
    }

    #[test]
    fn test_is_transient() {
        let rate_limit =
            CoachError::oracle_unavailable(OracleErrorKind::RateLimit, "Too many requests");
        assert!(rate_limit.is_transient());

        let auth_error =
            CoachError::oracle_unavailable(OracleErrorKind::Authentication, "Invalid key");
        assert!(!auth_error.is_transient());

        let config_error = CoachError::configuration("bad", "fix it");
        assert!(!config_error.is_transient());
    }

    #[test]
    fn test_is_fatal() {
        let config_error = CoachError::configuration("bad", "fix it");
        assert!(config_error.is_fatal());

        let auth_error =
            CoachError::oracle_unavailable(OracleErrorKind::Authentication, "Invalid key");
        assert!(auth_error.is_fatal());

        let rate_limit =
            CoachError::oracle_unavailable(OracleErrorKind::RateLimit, "Too many requests");
        assert!(!rate_limit.is_fatal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "stdin closed");
        let coach_err: CoachError = io_err.into();
        assert!(matches!(coach_err, CoachError::Io(_)));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = CoachError::invalid_transition("ShowingFeedback", "AwaitingLevelSelection");
        let msg = err.to_string();
        assert!(msg.contains("ShowingFeedback"));
        assert!(msg.contains("AwaitingLevelSelection"));
    }
}
