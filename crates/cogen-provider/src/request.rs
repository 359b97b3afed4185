//! Provider request types

use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

/// Provider credential
///
/// Never printed: `Debug` and `Display` both render `***`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret
    #[inline]
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret for the outbound call
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the secret is blank
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// One outbound provider call
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Prompt text
    pub prompt: String,
    /// Credential for this call
    pub credential: Credential,
    /// Completion token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Time budget for this call
    pub timeout: Duration,
}
