//! Generation session
//!
//! Orchestrates one request end to end:
//! description → prompt → provider → parser → sanitizer → scaffolder.
//!
//! A [`GenerationSession`] is a cheap handle; clones share the client,
//! scaffolder locks, in-flight registry and history, so one handle can
//! serve many concurrent runs.

use crate::config::{ConfigError, GeneratorConfig};
use crate::error::{FailureKind, SessionError};
use crate::prompt::PromptBuilder;
use crate::registry::InFlightRegistry;
use crate::request::GenerationRequest;
use crate::stage::{validate_transition, FailedStage, Stage};
use cogen_ident::{sanitize, Archetype};
use cogen_parser::ResponseParser;
use cogen_provider::{GenerationClient, HttpProvider, ModelProvider};
use cogen_scaffold::{GenerationResult, ProjectScaffolder, ScaffoldError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;
use ulid::Ulid;

/// Unique session run identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Ulid);

impl SessionId {
    /// Generate new ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SessionInner {
    client: GenerationClient,
    parser: ResponseParser,
    scaffolder: ProjectScaffolder,
    prompts: PromptBuilder,
    registry: InFlightRegistry,
    history: Mutex<Vec<GenerationResult>>,
    deadline: Option<Duration>,
}

/// Orchestrator for generation requests
#[derive(Clone)]
pub struct GenerationSession {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationSession")
            .field("client", &self.inner.client)
            .field("scaffolder", &self.inner.scaffolder)
            .field("deadline", &self.inner.deadline)
            .field("in_flight", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}

impl GenerationSession {
    /// Create session over any provider
    #[must_use]
    pub fn new(provider: Arc<dyn ModelProvider>, config: &GeneratorConfig) -> Self {
        let client = GenerationClient::new(provider, config.client_settings(), config.retry_policy());
        Self {
            inner: Arc::new(SessionInner {
                client,
                parser: ResponseParser::new(),
                scaffolder: ProjectScaffolder::new(config.scaffold.clone()),
                prompts: PromptBuilder::new(),
                registry: InFlightRegistry::new(),
                history: Mutex::new(Vec::new()),
                deadline: config.session_deadline(),
            }),
        }
    }

    /// Create session over the OpenAI-compatible HTTP provider
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the configuration is out of range
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let provider = HttpProvider::new(config.http_config())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Completed results of this process, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<GenerationResult> {
        self.inner.history.lock().clone()
    }

    /// Number of runs currently in flight
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.registry.len()
    }

    /// Run one request to completion
    ///
    /// # Errors
    /// Returns `SessionError` tagged with the failing stage:
    /// - `Idle`: `InvalidRequest`, `DuplicateInFlight`
    /// - `Requesting`: provider failures after the retry bound
    /// - `Parsing`: `NoContractFound` and other parse failures
    /// - `Sanitizing`: `InvalidIdentifier`
    /// - `Scaffolding`: `CollisionError`, `WriteFailure`, `Cancelled`
    pub async fn run(&self, request: GenerationRequest) -> Result<GenerationResult, SessionError> {
        let id = SessionId::new();
        let span = tracing::info_span!(
            "session",
            id = %id,
            description = %request.description().trim(),
        );
        self.run_inner(id, request).instrument(span).await
    }

    async fn run_inner(&self, id: SessionId, request: GenerationRequest) -> Result<GenerationResult, SessionError> {
        let inner = &self.inner;
        let mut stage = StageTracker::default();

        if request.description().trim().is_empty() {
            return Err(stage.fail(FailureKind::InvalidRequest("description is empty".into())));
        }
        if request.credential().is_blank() {
            return Err(stage.fail(FailureKind::InvalidRequest("credential is empty".into())));
        }

        let key = request.key();
        let _in_flight = match inner.registry.try_register(key.clone(), id) {
            Ok(guard) => guard,
            Err(holder) => {
                tracing::warn!(%holder, "identical request already in flight");
                return Err(stage.fail(FailureKind::DuplicateInFlight {
                    description: key.description().to_string(),
                    output_dir: key.output_dir().to_path_buf(),
                    holder,
                }));
            }
        };

        let deadline = inner.deadline.map(|d| Instant::now() + d);
        let hint = Archetype::from_description(request.description());
        let prompt = inner.prompts.build(request.description(), hint);
        tracing::info!(hint = %hint, "session started");

        stage.advance(Stage::Requesting);
        let raw = inner
            .client
            .generate(&prompt, request.credential(), deadline)
            .await
            .map_err(|e| stage.fail(e))?;

        stage.advance(Stage::Parsing);
        let parsed = inner.parser.parse(&raw).map_err(|e| {
            if request.verbose() {
                tracing::debug!(response = %raw, "unparseable response");
            }
            stage.fail(e)
        })?;

        stage.advance(Stage::Sanitizing);
        let name = sanitize(&parsed.candidate_name);
        name.validate().map_err(|e| stage.fail(e))?;
        if name.as_str() != parsed.candidate_name {
            tracing::info!(raw = %parsed.candidate_name, sanitized = %name, "contract name sanitized");
        }

        stage.advance(Stage::Scaffolding);
        let layout = inner.scaffolder.layout(request.output_dir(), &name);
        let scaffolder = inner.scaffolder.clone();
        let root = layout.root.clone();
        let result = tokio::task::spawn_blocking(move || scaffolder.materialize(&layout, &parsed, &name, deadline))
            .await
            .unwrap_or_else(|join| Err(ScaffoldError::write_failure(root, std::io::Error::other(join.to_string()))))
            .map_err(|e| stage.fail(e))?;

        stage.advance(Stage::Completed);
        inner.history.lock().push(result.clone());
        tracing::info!(
            project = %result.project_path.display(),
            contract = %result.contract_name,
            archetype = %result.archetype,
            "session completed"
        );

        Ok(result)
    }
}

/// Current stage of one run
#[derive(Debug, Default)]
struct StageTracker {
    current: Stage,
}

impl StageTracker {
    fn advance(&mut self, to: Stage) {
        if let Err(e) = validate_transition(self.current, to) {
            tracing::error!(error = %e, "stage order violated");
        }
        tracing::debug!(from = %self.current, to = %to, "stage transition");
        self.current = to;
    }

    fn fail(&mut self, kind: impl Into<FailureKind>) -> SessionError {
        let stage = self.current.as_failed().unwrap_or(FailedStage::Idle);
        let error = SessionError::new(stage, kind);
        tracing::warn!(stage = %stage, kind = error.kind_name(), error = %error.kind, "session failed");
        self.current = Stage::Failed(stage);
        error
    }
}
