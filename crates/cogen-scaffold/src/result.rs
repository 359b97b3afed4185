//! Generation result descriptor

use chrono::{DateTime, Utc};
use cogen_ident::{Archetype, SanitizedName};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptor of one successfully materialized project
///
/// Produced once per successful session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Final project root
    pub project_path: PathBuf,
    /// Contract source file
    pub contract_file: PathBuf,
    /// Deployment script
    pub deploy_script_file: PathBuf,
    /// Test stub, if one was written
    pub test_file: Option<PathBuf>,
    /// Name used by every artifact
    pub contract_name: SanitizedName,
    /// Archetype detected in the written source
    pub archetype: Archetype,
    /// blake3 hex digest of the contract file contents
    pub source_hash: String,
    /// Promotion time
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Every file written, contract first
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        [
            Some(&self.contract_file),
            Some(&self.deploy_script_file),
            self.test_file.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}
