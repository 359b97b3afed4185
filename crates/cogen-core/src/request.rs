//! Generation request and its idempotence key

use cogen_provider::Credential;
use cogen_scaffold::absolute_lexical;
use std::path::{Path, PathBuf};

/// One generation request; immutable once submitted
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    description: String,
    output_dir: PathBuf,
    verbose: bool,
    credential: Credential,
}

impl GenerationRequest {
    /// Create request writing into `output_dir`
    #[must_use]
    pub fn new(description: impl Into<String>, output_dir: impl Into<PathBuf>, credential: Credential) -> Self {
        Self {
            description: description.into(),
            output_dir: output_dir.into(),
            verbose: false,
            credential,
        }
    }

    /// With verbose diagnostics
    #[inline]
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Natural-language description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Directory the project is created in
    #[inline]
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether verbose diagnostics were requested
    #[inline]
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Provider credential
    #[inline]
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Idempotence key
    #[must_use]
    pub fn key(&self) -> RequestKey {
        RequestKey::new(&self.description, &self.output_dir)
    }
}

/// `(normalized description, normalized output dir)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    description: String,
    output_dir: PathBuf,
}

impl RequestKey {
    /// Normalize both parts
    #[must_use]
    pub fn new(description: &str, output_dir: &Path) -> Self {
        Self {
            description: normalize_description(description),
            output_dir: absolute_lexical(output_dir),
        }
    }

    /// Normalized description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized output directory
    #[inline]
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Trim, lower-case and collapse whitespace
#[must_use]
pub fn normalize_description(description: &str) -> String {
    description
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
