//! Generation client
//!
//! Wraps a [`ModelProvider`] with the retry and deadline policy:
//! - transient failures (timeout, rate limit, provider errors) are retried
//!   with bounded exponential backoff
//! - authentication and malformed-request failures fail fast
//! - a passed deadline stops everything with `Cancelled`

use crate::error::{GenerationError, ProviderError};
use crate::provider::ModelProvider;
use crate::request::{Credential, ProviderRequest};
use crate::retry::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Request settings shared by every attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientSettings {
    /// Completion token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound for a single attempt
    pub attempt_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.2,
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

/// Provider client with retry/backoff/timeout policy
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn ModelProvider>,
    settings: ClientSettings,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("settings", &self.settings)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GenerationClient {
    /// Create client
    #[inline]
    #[must_use]
    pub fn new(provider: Arc<dyn ModelProvider>, settings: ClientSettings, retry: RetryPolicy) -> Self {
        Self {
            provider,
            settings,
            retry,
        }
    }

    /// Get settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Get retry policy
    #[inline]
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send `prompt` and return the raw model text
    ///
    /// Each attempt is bounded by `min(attempt_timeout, deadline - now)`.
    ///
    /// # Errors
    /// - `GenerationError::AuthError` / `MalformedRequest` on the first such
    ///   failure
    /// - `GenerationError::NetworkFailure` when transient failures exhaust
    ///   the attempt bound (`RateLimited` if the last one was a rate limit)
    /// - `GenerationError::Cancelled` once `deadline` has passed
    pub async fn generate(
        &self,
        prompt: &str,
        credential: &Credential,
        deadline: Option<Instant>,
    ) -> Result<String, GenerationError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let Some(budget) = attempt_budget(self.settings.attempt_timeout, deadline) else {
                tracing::debug!(attempt, "deadline reached before attempt");
                return Err(GenerationError::Cancelled { attempts: attempt });
            };
            attempt += 1;

            let request = ProviderRequest {
                prompt: prompt.to_string(),
                credential: credential.clone(),
                max_tokens: self.settings.max_tokens,
                temperature: self.settings.temperature,
                timeout: budget,
            };

            tracing::debug!(attempt, max_attempts, budget_ms = budget.as_millis() as u64, "provider attempt");

            let error = match tokio::time::timeout(budget, self.provider.complete(&request)).await {
                Ok(Ok(text)) => {
                    tracing::debug!(attempt, bytes = text.len(), "provider responded");
                    return Ok(text);
                }
                Ok(Err(e)) => e,
                Err(_) => ProviderError::Timeout,
            };

            if deadline_passed(deadline) {
                return Err(GenerationError::Cancelled { attempts: attempt });
            }

            match error {
                ProviderError::Cancelled => {
                    return Err(GenerationError::Cancelled { attempts: attempt });
                }
                ProviderError::AuthError(message) => {
                    return Err(GenerationError::AuthError(message));
                }
                ProviderError::MalformedRequest(message) => {
                    return Err(GenerationError::MalformedRequest(message));
                }
                _ => {}
            }

            if attempt >= max_attempts {
                tracing::warn!(attempt, error = %error, "attempt bound exhausted");
                return Err(match error {
                    ProviderError::RateLimited { .. } => {
                        GenerationError::RateLimited { attempts: attempt }
                    }
                    last => GenerationError::NetworkFailure {
                        attempts: attempt,
                        last,
                    },
                });
            }

            let delay = self.retry.delay_for(attempt, &error);
            if let Some(deadline) = deadline {
                if Instant::now() + delay >= deadline {
                    tracing::debug!(attempt, "backoff would cross deadline");
                    return Err(GenerationError::Cancelled { attempts: attempt });
                }
            }

            tracing::warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "transient provider failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Time budget for the next attempt, `None` once the deadline has passed
fn attempt_budget(attempt_timeout: Duration, deadline: Option<Instant>) -> Option<Duration> {
    match deadline {
        None => Some(attempt_timeout),
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                None
            } else {
                Some(attempt_timeout.min(remaining))
            }
        }
    }
}

fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}
