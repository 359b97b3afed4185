//! Result and failure rendering

use cogen_core::SessionError;
use cogen_scaffold::GenerationResult;
use std::fmt::Write as _;

/// Human-readable success summary
pub(crate) fn success_text(result: &GenerationResult) -> String {
    let mut out = format!(
        "Created {} ({}) at {}\n",
        result.contract_name,
        result.archetype,
        result.project_path.display()
    );
    for file in result.files() {
        let shown = file.strip_prefix(&result.project_path).unwrap_or(file);
        let _ = writeln!(out, "  {}", shown.display());
    }
    out
}

/// JSON success summary
pub(crate) fn success_json(result: &GenerationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Failure lines for stderr
pub(crate) fn failure_text(error: &SessionError, verbose: bool) -> String {
    let mut out = format!("error: {error}\n");
    if verbose {
        let _ = writeln!(out, "stage: {}", error.stage);
        let _ = writeln!(out, "kind: {}", error.kind_name());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogen_core::{FailedStage, FailureKind};
    use cogen_ident::{Archetype, SanitizedName};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn result() -> GenerationResult {
        let root = PathBuf::from("/out/NFTTreasury");
        GenerationResult {
            contract_file: root.join("contracts/NFTTreasury.sol"),
            deploy_script_file: root.join("scripts/deploy-NFTTreasury.js"),
            test_file: None,
            project_path: root,
            contract_name: SanitizedName::parse("NFTTreasury").unwrap(),
            archetype: Archetype::ERC721,
            source_hash: "00".repeat(32),
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn success_lists_relative_files() {
        assert_eq!(
            success_text(&result()),
            "Created NFTTreasury (ERC721) at /out/NFTTreasury\n  contracts/NFTTreasury.sol\n  scripts/deploy-NFTTreasury.js\n"
        );
    }

    #[test]
    fn json_carries_contract_name() {
        let json = success_json(&result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["contract_name"], "NFTTreasury");
        assert_eq!(value["test_file"], serde_json::Value::Null);
    }

    #[test]
    fn verbose_failure_names_stage_and_kind() {
        let error = SessionError::new(FailedStage::Idle, FailureKind::InvalidRequest("description is empty".into()));

        assert_eq!(failure_text(&error, false), "error: Idle stage failed: invalid request: description is empty\n");
        assert_eq!(
            failure_text(&error, true),
            "error: Idle stage failed: invalid request: description is empty\nstage: Idle\nkind: InvalidRequest\n"
        );
    }
}
