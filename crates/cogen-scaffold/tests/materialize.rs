//! End-to-end materialization from realistic model responses

use cogen_ident::{sanitize, Archetype};
use cogen_parser::ResponseParser;
use cogen_scaffold::{ProjectScaffolder, ScaffoldError, ScaffoldOptions};
use cogen_test_utils::fixtures::{ERC20_RESPONSE, ERC721_RESPONSE, NFT_TREASURY_RESPONSE};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Barrier};

fn listing(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path.strip_prefix(root).unwrap().display().to_string());
            }
        }
    }
    out.sort();
    out
}

/// Identifier-like tokens in JavaScript text that contain a hyphen
fn hyphenated_identifiers(script: &str) -> Vec<String> {
    script
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .flat_map(|line| {
            line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '$'))
                .filter(|tok| tok.contains('-') && tok.chars().any(|c| c.is_ascii_alphabetic()))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn erc721_round_trip() {
    let out = tempfile::tempdir().unwrap();
    let parsed = ResponseParser::new().parse(ERC721_RESPONSE).unwrap();
    assert_eq!(parsed.detected_archetype, Archetype::ERC721);

    let name = sanitize(&parsed.candidate_name);
    assert_eq!(name.as_str(), "ERC721Contract");

    let scaffolder = ProjectScaffolder::default();
    let layout = scaffolder.layout(out.path(), &name);
    let result = scaffolder.materialize(&layout, &parsed, &name, None).unwrap();

    assert_eq!(
        listing(&result.project_path),
        vec![
            "contracts/ERC721Contract.sol",
            "scripts/deploy-ERC721Contract.js",
            "tests/ERC721Contract.test.js",
        ]
    );

    let source = fs::read_to_string(&result.contract_file).unwrap();
    assert!(source.contains("contract ERC721Contract is ERC721, Ownable {"));

    let script = fs::read_to_string(&result.deploy_script_file).unwrap();
    assert!(script.contains(r#"getContractFactory("ERC721Contract")"#));
    assert!(script.contains("const ERC721Contract = await factory.deploy(deployer.address);"));
    assert!(hyphenated_identifiers(&script).is_empty());
    assert_eq!(result.archetype, Archetype::ERC721);
}

/// Regression: `NFT-Treasury` used to be embedded verbatim as a script identifier
#[test]
fn deploy_script_references_result_name_exactly() {
    let out = tempfile::tempdir().unwrap();
    let parsed = ResponseParser::new().parse(NFT_TREASURY_RESPONSE).unwrap();
    let name = sanitize(&parsed.candidate_name);
    let scaffolder = ProjectScaffolder::default();
    let layout = scaffolder.layout(out.path(), &name);

    let result = scaffolder.materialize(&layout, &parsed, &name, None).unwrap();
    let script = fs::read_to_string(&result.deploy_script_file).unwrap();
    let contract_name = result.contract_name.as_str();

    assert_eq!(contract_name, "NFTTreasury");
    assert!(script.contains(&format!("getContractFactory(\"{contract_name}\")")));
    assert!(script.contains(&format!("const {contract_name} = await factory.deploy(\"{contract_name}\", 0);")));
    assert!(!script.contains("NFT-Treasury"));
    assert!(hyphenated_identifiers(&script).is_empty());

    let source = fs::read_to_string(&result.contract_file).unwrap();
    assert!(!source.contains("NFT-Treasury"));
}

#[test]
fn no_tests_option_skips_stub() {
    let out = tempfile::tempdir().unwrap();
    let parsed = ResponseParser::new().parse(ERC20_RESPONSE).unwrap();
    let name = sanitize(&parsed.candidate_name);
    let scaffolder = ProjectScaffolder::new(ScaffoldOptions::default().with_tests(false));
    let layout = scaffolder.layout(out.path(), &name);

    let result = scaffolder.materialize(&layout, &parsed, &name, None).unwrap();

    assert!(result.test_file.is_none());
    assert_eq!(
        listing(&result.project_path),
        vec!["contracts/SimpleToken.sol", "scripts/deploy-SimpleToken.js"]
    );
}

#[test]
fn second_materialization_collides_and_keeps_first() {
    let out = tempfile::tempdir().unwrap();
    let parsed = ResponseParser::new().parse(ERC20_RESPONSE).unwrap();
    let name = sanitize(&parsed.candidate_name);
    let scaffolder = ProjectScaffolder::default();
    let layout = scaffolder.layout(out.path(), &name);

    let first = scaffolder.materialize(&layout, &parsed, &name, None).unwrap();
    let before = fs::read_to_string(&first.contract_file).unwrap();

    let err = scaffolder.materialize(&layout, &parsed, &name, None).unwrap_err();
    assert!(matches!(err, ScaffoldError::Collision { .. }));
    assert_eq!(fs::read_to_string(&first.contract_file).unwrap(), before);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
}

#[test]
fn concurrent_materializations_of_one_path_never_interleave() {
    let out = tempfile::tempdir().unwrap();
    let parsed = Arc::new(ResponseParser::new().parse(ERC20_RESPONSE).unwrap());
    let name = sanitize(&parsed.candidate_name);
    let scaffolder = ProjectScaffolder::default();
    let layout = Arc::new(scaffolder.layout(out.path(), &name));
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scaffolder = scaffolder.clone();
            let parsed = Arc::clone(&parsed);
            let layout = Arc::clone(&layout);
            let name = name.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                scaffolder.materialize(&layout, &parsed, &name, None)
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = outcomes.iter().filter(|o| o.is_ok()).count();
    assert_eq!(successes, 1);
    for outcome in outcomes.iter().filter_map(|o| o.as_ref().err()) {
        assert_eq!(outcome.kind_name(), "CollisionError");
    }

    assert_eq!(
        listing(out.path()),
        vec![
            "SimpleToken/contracts/SimpleToken.sol",
            "SimpleToken/scripts/deploy-SimpleToken.js",
            "SimpleToken/tests/SimpleToken.test.js",
        ]
    );
}

#[test]
fn result_serializes_for_reporting() {
    let out = tempfile::tempdir().unwrap();
    let parsed = ResponseParser::new().parse(ERC20_RESPONSE).unwrap();
    let name = sanitize(&parsed.candidate_name);
    let scaffolder = ProjectScaffolder::default();
    let layout = scaffolder.layout(out.path(), &name);
    let result = scaffolder.materialize(&layout, &parsed, &name, None).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["contract_name"], "SimpleToken");
    assert_eq!(json["archetype"], "ERC20");
    assert_eq!(json["source_hash"].as_str().unwrap().len(), 64);
}
