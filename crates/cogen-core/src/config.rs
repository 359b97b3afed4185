//! Generator configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file (`--config <path>`, else `./cogen.toml` if present)
//! 3. `COGEN_BASE_URL` / `COGEN_MODEL`
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [provider]
//! model = "gpt-4o"
//!
//! [retry]
//! max_attempts = 6
//!
//! [scaffold]
//! script_ext = "ts"
//! ```

use cogen_provider::{ClientSettings, Credential, HttpProviderConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_MODEL};
use cogen_scaffold::ScaffoldOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cogen.toml";

/// Environment override for the provider base URL
pub const ENV_BASE_URL: &str = "COGEN_BASE_URL";
/// Environment override for the model
pub const ENV_MODEL: &str = "COGEN_MODEL";
/// Credential environment variables, in lookup order
pub const ENV_API_KEYS: [&str; 2] = ["COGEN_API_KEY", "OPENAI_API_KEY"];

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`GeneratorConfig`]
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),

    /// No credential from flag or environment
    #[error("no API key: pass --api-key or set {} or {}", ENV_API_KEYS[0], ENV_API_KEYS[1])]
    MissingCredential,
}

/// Provider section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Completion token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-attempt timeout, seconds
    pub attempt_timeout_secs: u64,
    /// Connect timeout, seconds
    pub connect_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            temperature: 0.2,
            attempt_timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

/// Retry section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempt bound, including the first attempt
    pub max_attempts: u32,
    /// First backoff, milliseconds
    pub initial_backoff_ms: u64,
    /// Backoff ceiling, milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }
}

/// Session section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whole-session deadline, seconds; `0` disables it
    pub deadline_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { deadline_secs: 300 }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider settings
    pub provider: ProviderConfig,
    /// Retry policy
    pub retry: RetryConfig,
    /// Artifact options
    pub scaffold: ScaffoldOptions,
    /// Session limits
    pub session: SessionConfig,
}

impl GeneratorConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` (with an empty path) on invalid TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `explicit`, else `./cogen.toml` if present, else defaults
    ///
    /// # Errors
    /// An explicit path that cannot be read or parsed is an error; a
    /// missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment overrides using `lookup`
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.provider.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.provider.model = model;
        }
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::Invalid(format!(
                "provider.temperature must be within 0.0..=2.0, got {}",
                self.provider.temperature
            )));
        }
        if self.provider.attempt_timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.attempt_timeout_secs must be positive".into()));
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigError::Invalid("provider.max_tokens must be positive".into()));
        }
        self.scaffold
            .check_extensions()
            .map_err(|e| ConfigError::Invalid(format!("scaffold.{e}")))?;
        Ok(())
    }

    /// Client settings
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            max_tokens: self.provider.max_tokens,
            temperature: self.provider.temperature,
            attempt_timeout: Duration::from_secs(self.provider.attempt_timeout_secs),
        }
    }

    /// Retry policy
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.initial_backoff_ms),
            Duration::from_millis(self.retry.max_backoff_ms),
        )
    }

    /// HTTP provider settings
    #[must_use]
    pub fn http_config(&self) -> HttpProviderConfig {
        HttpProviderConfig {
            base_url: self.provider.base_url.clone(),
            model: self.provider.model.clone(),
            connect_timeout: Duration::from_secs(self.provider.connect_timeout_secs),
        }
    }

    /// Session deadline, `None` if disabled
    #[must_use]
    pub fn session_deadline(&self) -> Option<Duration> {
        (self.session.deadline_secs > 0).then(|| Duration::from_secs(self.session.deadline_secs))
    }
}

/// Resolve the credential: `flag`, else the first set environment variable
///
/// # Errors
/// Returns `ConfigError::MissingCredential` if nothing non-blank is found.
pub fn resolve_credential<F>(flag: Option<&str>, lookup: F) -> Result<Credential, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    flag.map(str::to_string)
        .into_iter()
        .chain(ENV_API_KEYS.iter().filter_map(|var| lookup(*var)))
        .map(Credential::new)
        .find(|credential| !credential.is_blank())
        .ok_or(ConfigError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.session_deadline(), Some(Duration::from_secs(300)));
        assert!(config.scaffold.include_tests);
        config.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GeneratorConfig::from_toml_str(
            "[provider]\nmodel = \"gpt-4o\"\n\n[scaffold]\nscript_ext = \"ts\"\n\n[session]\ndeadline_secs = 0\n",
        )
        .unwrap();
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.max_tokens, 2048);
        assert_eq!(config.scaffold.script_ext, "ts");
        assert_eq!(config.scaffold.source_ext, "sol");
        assert_eq!(config.session_deadline(), None);
    }

    #[test]
    fn unknown_types_are_parse_errors() {
        let err = GeneratorConfig::from_toml_str("[retry]\nmax_attempts = \"many\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeneratorConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cogen.toml");
        std::fs::write(&path, "[retry]\nmax_attempts = 2\n").unwrap();
        let config = GeneratorConfig::load(Some(&path)).unwrap();
        assert_eq!(config.retry_policy().max_attempts, 2);
    }

    #[test]
    fn env_overrides_file() {
        let config = GeneratorConfig::default().with_env_overrides(env(&[
            (ENV_BASE_URL, "http://localhost:11434/v1"),
            (ENV_MODEL, ""),
        ]));
        assert_eq!(config.provider.base_url, "http://localhost:11434/v1");
        assert_eq!(config.provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut config = GeneratorConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GeneratorConfig::default();
        config.provider.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.scaffold.script_ext = ".js".into();
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.scaffold.source_ext = "vy".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scaffold.source_ext"), "{err}");

        let mut config = GeneratorConfig::default();
        config.scaffold.script_ext = "ts".into();
        config.validate().unwrap();
    }

    #[test]
    fn credential_precedence() {
        let lookup = env(&[("COGEN_API_KEY", "from-cogen"), ("OPENAI_API_KEY", "from-openai")]);
        assert_eq!(resolve_credential(Some("from-flag"), &lookup).unwrap().expose(), "from-flag");
        assert_eq!(resolve_credential(None, &lookup).unwrap().expose(), "from-cogen");

        let lookup = env(&[("COGEN_API_KEY", "  "), ("OPENAI_API_KEY", "from-openai")]);
        assert_eq!(resolve_credential(None, &lookup).unwrap().expose(), "from-openai");

        let err = resolve_credential(Some(""), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }
}
