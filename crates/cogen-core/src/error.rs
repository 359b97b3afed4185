//! Session error taxonomy
//!
//! Every failure carries the stage it happened in:
//! - provider failures (`NetworkFailure`, `AuthError`, `RateLimited`, ...)
//! - parse failures (`NoContractFound`, `UnbalancedBraces`, ...)
//! - identifier and filesystem failures (`InvalidIdentifier`,
//!   `CollisionError`, `WriteFailure`)
//! - session guards (`DuplicateInFlight`, `InvalidRequest`)

use crate::session::SessionId;
use crate::stage::FailedStage;
use cogen_ident::IdentifierError;
use cogen_parser::ParseError;
use cogen_provider::GenerationError;
use cogen_scaffold::ScaffoldError;
use std::path::PathBuf;

/// What went wrong
#[derive(Debug, thiserror::Error)]
pub enum FailureKind {
    /// Provider call failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Model output could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Sanitized name failed the identifier check
    #[error("invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    /// Filesystem materialization failed
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    /// Identical request is still running
    #[error("identical request already in flight (session {holder}) for {} in {}", description, output_dir.display())]
    DuplicateInFlight {
        /// Normalized description
        description: String,
        /// Normalized output directory
        output_dir: PathBuf,
        /// Session holding the request
        holder: SessionId,
    },

    /// Request rejected before any work
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FailureKind {
    /// Taxonomy label
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Generation(e) => e.kind_name(),
            Self::Parse(e) => e.kind_name(),
            Self::Identifier(_) => "InvalidIdentifier",
            Self::Scaffold(e) => e.kind_name(),
            Self::DuplicateInFlight { .. } => "DuplicateInFlight",
            Self::InvalidRequest(_) => "InvalidRequest",
        }
    }
}

/// Session failure tagged with its stage
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {kind}")]
pub struct SessionError {
    /// Stage the failure happened in
    pub stage: FailedStage,
    /// Failure
    #[source]
    pub kind: FailureKind,
}

impl SessionError {
    /// Create error
    #[inline]
    #[must_use]
    pub fn new(stage: FailedStage, kind: impl Into<FailureKind>) -> Self {
        Self {
            stage,
            kind: kind.into(),
        }
    }

    /// Taxonomy label of the failure
    #[inline]
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }

    /// Check if re-running the same request later may succeed
    ///
    /// Collisions are never retryable: the project already exists.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Generation(
                GenerationError::NetworkFailure { .. }
                    | GenerationError::RateLimited { .. }
                    | GenerationError::Cancelled { .. }
            ) | FailureKind::Parse(_)
                | FailureKind::DuplicateInFlight { .. }
        )
    }
}
