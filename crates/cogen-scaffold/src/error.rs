//! Scaffolding errors

use cogen_ident::{IdentifierError, SanitizedName};
use std::path::PathBuf;

/// Errors while materializing a project
///
/// Every variant leaves the final project path untouched.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Name failed the pre-write identifier check
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// Layout root is not named after the contract
    #[error("layout root {} does not match contract name {expected}", root.display())]
    LayoutMismatch {
        /// Name the artifacts were rendered with
        expected: SanitizedName,
        /// Root of the supplied layout
        root: PathBuf,
    },

    /// Target project path exists or is being written by another session
    #[error("project path already exists: {}", path.display())]
    Collision {
        /// Final project root
        path: PathBuf,
    },

    /// Filesystem I/O failed; the staging area was discarded
    #[error("write failed at {}: {source}", path.display())]
    WriteFailure {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Deadline passed before promotion
    #[error("scaffolding cancelled before promotion")]
    Cancelled,
}

impl ScaffoldError {
    /// Create write failure for path
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Taxonomy label
    #[inline]
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) | Self::LayoutMismatch { .. } => "InvalidIdentifier",
            Self::Collision { .. } => "CollisionError",
            Self::WriteFailure { .. } => "WriteFailure",
            Self::Cancelled => "Cancelled",
        }
    }
}
