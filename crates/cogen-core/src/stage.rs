//! Session state machine
//!
//! `Idle → Requesting → Parsing → Sanitizing → Scaffolding → Completed`,
//! with `Failed(stage)` reachable from every non-terminal stage.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A stage a session can fail in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailedStage {
    /// Request validation or idempotence check
    Idle,
    /// Provider call
    Requesting,
    /// Response parsing
    Parsing,
    /// Name sanitizing
    Sanitizing,
    /// Filesystem materialization
    Scaffolding,
}

impl FailedStage {
    /// Stable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Requesting => "Requesting",
            Self::Parsing => "Parsing",
            Self::Sanitizing => "Sanitizing",
            Self::Scaffolding => "Scaffolding",
        }
    }
}

impl Display for FailedStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Not started
    #[default]
    Idle,
    /// Waiting for the provider
    Requesting,
    /// Extracting the contract
    Parsing,
    /// Deriving the project name
    Sanitizing,
    /// Writing the project
    Scaffolding,
    /// Project promoted (terminal)
    Completed,
    /// Failed in the given stage (terminal)
    Failed(FailedStage),
}

impl Stage {
    /// Non-terminal stage as a failure location
    #[inline]
    #[must_use]
    pub fn as_failed(self) -> Option<FailedStage> {
        match self {
            Self::Idle => Some(FailedStage::Idle),
            Self::Requesting => Some(FailedStage::Requesting),
            Self::Parsing => Some(FailedStage::Parsing),
            Self::Sanitizing => Some(FailedStage::Sanitizing),
            Self::Scaffolding => Some(FailedStage::Scaffolding),
            Self::Completed | Self::Failed(_) => None,
        }
    }

    /// Check if no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("Completed"),
            Self::Failed(stage) => write!(f, "Failed({stage})"),
            other => match other.as_failed() {
                Some(stage) => f.write_str(stage.label()),
                None => Ok(()),
            },
        }
    }
}

/// Illegal stage transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal stage transition: {from} -> {to}")]
pub struct TransitionError {
    /// Current stage
    pub from: Stage,
    /// Requested stage
    pub to: Stage,
}

/// Validate a stage transition
///
/// # Errors
/// Returns `TransitionError` if `to` is not reachable from `from`.
pub fn validate_transition(from: Stage, to: Stage) -> Result<(), TransitionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

/// Stages reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: Stage) -> Vec<Stage> {
    use Stage::{Completed, Failed, Idle, Parsing, Requesting, Sanitizing, Scaffolding};
    match from {
        Idle => vec![Requesting, Failed(FailedStage::Idle)],
        Requesting => vec![Parsing, Failed(FailedStage::Requesting)],
        Parsing => vec![Sanitizing, Failed(FailedStage::Parsing)],
        Sanitizing => vec![Scaffolding, Failed(FailedStage::Sanitizing)],
        Scaffolding => vec![Completed, Failed(FailedStage::Scaffolding)],
        Completed | Failed(_) => vec![],
    }
}
