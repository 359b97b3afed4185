//! cogen provider - generative-model client
//!
//! - [`ModelProvider`]: the capability interface (`complete(request)`)
//! - [`HttpProvider`]: OpenAI-compatible implementation over `reqwest`
//! - [`GenerationClient`]: retry, backoff, timeout and deadline policy
//!
//! # Example
//!
//! ```rust,ignore
//! use cogen_provider::{ClientSettings, Credential, GenerationClient, HttpProvider, RetryPolicy};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpProvider::new(Default::default())?;
//! let client = GenerationClient::new(Arc::new(provider), ClientSettings::default(), RetryPolicy::default());
//! let text = client.generate("An ERC721 collection", &Credential::new("sk-..."), None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod client;
pub mod error;
pub mod http;
pub mod provider;
pub mod request;
pub mod retry;

pub use client::{ClientSettings, GenerationClient};
pub use error::{GenerationError, ProviderError};
pub use http::{classify_status, HttpProvider, HttpProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use provider::ModelProvider;
pub use request::{Credential, ProviderRequest};
pub use retry::RetryPolicy;

/// Deadline type accepted by [`GenerationClient::generate`]
pub use tokio::time::Instant as Deadline;
