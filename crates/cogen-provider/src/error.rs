//! Error types for the generation client
//!
//! Two layers:
//! - [`ProviderError`]: what a single provider call can fail with
//! - [`GenerationError`]: what `generate` reports after its retry policy
//!   has run

use std::time::Duration;

/// Failure of one provider call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Call did not complete within its timeout
    #[error("provider request timed out")]
    Timeout,

    /// Credential rejected
    #[error("authentication rejected: {0}")]
    AuthError(String),

    /// Provider asked us to slow down
    #[error("rate limited by provider")]
    RateLimited {
        /// Provider-suggested wait, if sent
        retry_after: Option<Duration>,
    },

    /// Provider-side failure (5xx-class, broken connection, unusable body)
    #[error("provider error (status {}): {message}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
    Upstream {
        /// HTTP status, if a response arrived
        status: Option<u16>,
        /// Diagnostic message
        message: String,
    },

    /// Provider refused the request as malformed
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Call was cancelled
    #[error("provider request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Check if another attempt may succeed
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::RateLimited { .. } | Self::Upstream { .. }
        )
    }

    /// Create an upstream error
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

/// Failure of `GenerationClient::generate`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Transient failures exhausted the attempt bound
    #[error("network failure after {attempts} attempt(s): {last}")]
    NetworkFailure {
        /// Attempts made
        attempts: u32,
        /// Error of the final attempt
        last: ProviderError,
    },

    /// Credential rejected; never retried
    #[error("authentication failed: {0}")]
    AuthError(String),

    /// Still rate limited when the attempt bound was reached
    #[error("rate limited after {attempts} attempt(s)")]
    RateLimited {
        /// Attempts made
        attempts: u32,
    },

    /// Request refused as malformed; never retried
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Deadline reached; no further attempts were made
    #[error("generation cancelled after {attempts} attempt(s)")]
    Cancelled {
        /// Attempts made before cancelling
        attempts: u32,
    },
}

impl GenerationError {
    /// Taxonomy label used in diagnostics
    #[inline]
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } => "NetworkFailure",
            Self::AuthError(_) => "AuthError",
            Self::RateLimited { .. } => "RateLimited",
            Self::MalformedRequest(_) => "MalformedRequest",
            Self::Cancelled { .. } => "Cancelled",
        }
    }

    /// Number of provider calls made, when known
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::NetworkFailure { attempts, .. }
            | Self::RateLimited { attempts }
            | Self::Cancelled { attempts } => Some(*attempts),
            Self::AuthError(_) | Self::MalformedRequest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(ProviderError::Timeout.is_transient());
        assert!(ProviderError::RateLimited { retry_after: None }.is_transient());
        assert!(ProviderError::upstream(Some(503), "unavailable").is_transient());
        assert!(!ProviderError::AuthError("bad key".into()).is_transient());
        assert!(!ProviderError::MalformedRequest("bad json".into()).is_transient());
        assert!(!ProviderError::Cancelled.is_transient());
    }

    #[test]
    fn network_failure_display_includes_attempts() {
        let err = GenerationError::NetworkFailure {
            attempts: 4,
            last: ProviderError::Timeout,
        };
        let text = err.to_string();
        assert!(text.contains("4 attempt"));
        assert!(text.contains("timed out"));
        assert_eq!(err.attempts(), Some(4));
        assert_eq!(err.kind_name(), "NetworkFailure");
    }

    #[test]
    fn upstream_display_without_status() {
        let err = ProviderError::upstream(None, "connection reset");
        assert_eq!(
            err.to_string(),
            "provider error (status none): connection reset"
        );
    }
}
