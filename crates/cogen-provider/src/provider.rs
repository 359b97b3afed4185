//! Provider capability
//!
//! The only non-deterministic collaborator in the pipeline sits behind
//! [`ModelProvider`], so tests can swap in a scripted stub.

use crate::error::ProviderError;
use crate::request::ProviderRequest;
use async_trait::async_trait;

/// Generative-model provider
///
/// One call is one outbound request. Implementations classify failures
/// into [`ProviderError`]; retries are the client's job, not theirs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send `request` and return the raw completion text
    async fn complete(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
