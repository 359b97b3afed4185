//! Structural scanning of Solidity source
//!
//! All functions take the original text and its [`mask`](crate::mask::mask)
//! so that comments and string literals never produce matches.

use crate::mask::matching_close;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// `contract <Name> [is ...] {`
///
/// Names admit hyphens so a raw model name such as `NFT-Treasury` is
/// captured whole and sanitized later.
static CONTRACT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:abstract[ \t]+)?contract[ \t]+([A-Za-z0-9_$][A-Za-z0-9_$\-]*)[^{;]*\{")
        .expect("valid contract declaration regex")
});

static CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bconstructor\s*\(").expect("valid constructor regex"));

/// Data location and mutability keywords that can sit between a
/// parameter's type and its name
const PARAM_MODIFIERS: &[&str] = &["memory", "calldata", "storage", "payable", "indexed"];

/// A located `contract` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Name as written (may contain hyphens)
    pub name: String,
    /// Byte range of the name
    pub name_span: Range<usize>,
    /// Offset of the first byte of the declaration line
    pub line_start: usize,
    /// Offset of the opening `{`
    pub open_brace: usize,
}

/// Constructor parameter of the generated contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorParam {
    /// Solidity type (`address`, `uint256`, `string`, ...)
    pub ty: String,
    /// Parameter name (`arg<N>` if unnamed)
    pub name: String,
}

/// Find the first `contract` declaration
#[must_use]
pub fn find_declaration(source: &str, masked: &str) -> Option<Declaration> {
    CONTRACT_DECL
        .captures_iter(masked)
        .find_map(|caps| declaration_from(source, &caps))
}

/// Find the first declaration of a contract called `name`
#[must_use]
pub fn find_named_declaration(source: &str, masked: &str, name: &str) -> Option<Declaration> {
    CONTRACT_DECL
        .captures_iter(masked)
        .filter_map(|caps| declaration_from(source, &caps))
        .find(|decl| decl.name == name)
}

fn declaration_from(source: &str, caps: &regex::Captures<'_>) -> Option<Declaration> {
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    let raw = &source[name.range()];
    let trimmed = raw.trim_end_matches('-');
    Some(Declaration {
        name: trimmed.to_string(),
        name_span: name.start()..name.start() + trimmed.len(),
        line_start: whole.start() + (whole.as_str().len() - whole.as_str().trim_start().len()),
        open_brace: whole.end() - 1,
    })
}

/// Offset where the preamble above `line_start` begins
///
/// Walks upward over SPDX, `pragma`, `import`, comment and blank lines.
/// Anything else (an interface body, prose) ends the walk.
#[must_use]
pub fn preamble_start(source: &str, line_start: usize) -> usize {
    let head = &source[..line_start];
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in head.split_inclusive('\n') {
        lines.push((offset, line.trim()));
        offset += line.len();
    }

    let mut start = line_start;
    for &(at, line) in lines.iter().rev() {
        if !is_preamble_line(line) {
            break;
        }
        start = at;
    }

    // Leading blank lines are not part of the preamble
    while start < line_start {
        let rest = &source[start..line_start];
        match rest.find('\n') {
            Some(nl) if rest[..nl].trim().is_empty() => start += nl + 1,
            _ => break,
        }
    }

    start
}

fn is_preamble_line(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with('*')
        || line.starts_with("pragma ")
        || line.starts_with("import ")
}

/// Extract constructor parameters from the body of `decl`
#[must_use]
pub fn constructor_params(source: &str, masked: &str, decl: &Declaration) -> Vec<ConstructorParam> {
    let Some(body_end) = matching_close(masked, decl.open_brace) else {
        return Vec::new();
    };
    let body = &masked[decl.open_brace..body_end];

    let Some(found) = CONSTRUCTOR.find(body) else {
        return Vec::new();
    };
    let open = decl.open_brace + found.end() - 1;
    let Some(close) = matching_close(masked, open) else {
        return Vec::new();
    };

    source[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(idx, param)| parse_param(idx, param))
        .collect()
}

fn parse_param(idx: usize, param: &str) -> ConstructorParam {
    let tokens: Vec<&str> = param.split_whitespace().collect();
    let ty = tokens.first().copied().unwrap_or_default().to_string();
    let name = tokens
        .iter()
        .skip(1)
        .rev()
        .find(|t| !PARAM_MODIFIERS.contains(t))
        .map_or_else(|| format!("arg{idx}"), |t| (*t).to_string());
    ConstructorParam { ty, name }
}
