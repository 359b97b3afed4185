//! cogen core - generation session
//!
//! Turns a natural-language description into a Hardhat-style project:
//! - [`GenerationSession`]: runs the pipeline and tags failures by stage
//! - [`GeneratorConfig`]: TOML + environment configuration
//! - [`Stage`]: `Idle → Requesting → Parsing → Sanitizing → Scaffolding → Completed`
//! - [`InFlightRegistry`]: rejects identical concurrent requests
//!
//! # Example
//!
//! ```rust,ignore
//! use cogen_core::{GenerationRequest, GenerationSession, GeneratorConfig};
//! use cogen_provider::Credential;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::load(None)?;
//! let session = GenerationSession::from_config(&config)?;
//! let request = GenerationRequest::new("An ERC721 collection", "./out", Credential::new("sk-..."));
//! let result = session.run(request).await?;
//! println!("{}", result.project_path.display());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod request;
pub mod session;
pub mod stage;

pub use config::{
    resolve_credential, ConfigError, GeneratorConfig, ProviderConfig, RetryConfig, SessionConfig,
    DEFAULT_CONFIG_FILE, ENV_API_KEYS, ENV_BASE_URL, ENV_MODEL,
};
pub use error::{FailureKind, SessionError};
pub use prompt::PromptBuilder;
pub use registry::{InFlightGuard, InFlightRegistry};
pub use request::{GenerationRequest, RequestKey};
pub use session::{GenerationSession, SessionId};
pub use stage::{allowed_transitions, validate_transition, FailedStage, Stage, TransitionError};
