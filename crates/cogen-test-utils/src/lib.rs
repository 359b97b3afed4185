//! Testing utilities for the cogen workspace
//!
//! Deterministic [`ModelProvider`] stand-ins and canned model responses.

#![allow(missing_docs)]

pub mod fixtures;

use async_trait::async_trait;
use cogen_provider::{Credential, ModelProvider, ProviderError, ProviderRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Notify;

pub fn test_credential() -> Credential {
    Credential::new("sk-test")
}

/// Replays scripted outcomes in order; the last one repeats
#[derive(Debug)]
pub struct StubProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
}

impl StubProvider {
    pub fn sequence(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::sequence(vec![Ok(text.into())])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::sequence(vec![Err(error)])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ModelProvider for StubProvider {
    async fn complete(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(request.prompt.clone());

        let mut script = self.script.lock();
        let next = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        next.unwrap_or_else(|| Err(ProviderError::upstream(None, "stub script is empty")))
    }
}

/// Blocks inside `complete` until [`release`](Self::release) is called
#[derive(Debug)]
pub struct GatedProvider {
    response: String,
    entered: Notify,
    gate: Notify,
    calls: AtomicU32,
}

impl GatedProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            entered: Notify::new(),
            gate: Notify::new(),
            calls: AtomicU32::new(0),
        }
    }

    /// Wait until a call is parked at the gate
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let one parked (or the next) call through
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for GatedProvider {
    async fn complete(&self, _request: &ProviderRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.response.clone())
    }
}

/// Never answers
#[derive(Debug, Default)]
pub struct HangingProvider {
    calls: AtomicU32,
}

impl HangingProvider {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for HangingProvider {
    async fn complete(&self, _request: &ProviderRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}
