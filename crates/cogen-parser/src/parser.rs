//! Response parser
//!
//! Turns raw model output into a [`ParsedContract`]:
//! 1. fenced blocks holding a declaration win (Solidity-tagged first)
//! 2. otherwise the raw text is scanned and the preamble plus the
//!    declaration through its matching brace is cut out
//! 3. the body must have balanced braces
//! 4. a missing SPDX line or `pragma solidity` is synthesized

use crate::decl::{
    constructor_params, find_declaration, find_named_declaration, preamble_start, ConstructorParam,
};
use crate::error::ParseError;
use crate::fence::fenced_blocks;
use crate::mask::{brace_counts, mask, matching_close};
use cogen_ident::{Archetype, SanitizedName};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default license line
pub const DEFAULT_LICENSE_LINE: &str = "// SPDX-License-Identifier: MIT";

/// Default compiler pragma
pub const DEFAULT_PRAGMA_LINE: &str = "pragma solidity ^0.8.20;";

static PRAGMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*pragma[ \t]+solidity\b").expect("valid pragma regex"));

/// Where the source body was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    /// Inside a fenced code block
    Fenced {
        /// Info-string language, if any
        language: Option<String>,
    },
    /// Cut out of unfenced text
    Raw,
}

/// Contract extracted from a model response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContract {
    /// Declared name, exactly as the model wrote it
    pub candidate_name: String,
    /// Complete source file, header included
    pub source_body: String,
    /// What the source inherits
    pub detected_archetype: Archetype,
    /// Whether a license or pragma line was added
    pub header_synthesized: bool,
    /// Parameters of the declared contract's constructor
    pub constructor_params: Vec<ConstructorParam>,
    /// Where the body came from
    pub origin: SourceOrigin,
}

impl ParsedContract {
    /// Source with the contract renamed to `name`
    ///
    /// Every code occurrence of `candidate_name` as a whole word is
    /// replaced: the declaration, type uses and casts. Comments, strings
    /// and member accesses (`x.name`) are left alone.
    ///
    /// When the contract lists its own name among its bases
    /// (`contract ERC721 is ERC721`), every other occurrence refers to the
    /// base, so only the declaration changes.
    #[must_use]
    pub fn renamed_source(&self, name: &SanitizedName) -> String {
        let source = &self.source_body;
        let masked = mask(source);
        let Some(decl) = find_named_declaration(source, &masked, &self.candidate_name) else {
            return source.clone();
        };

        let heading = decl.name_span.end..decl.open_brace;
        let shadows_base = word_spans(&masked[heading.clone()], &self.candidate_name).next().is_some();
        let spans: Vec<Range<usize>> = if shadows_base {
            vec![decl.name_span]
        } else {
            word_spans(&masked, &self.candidate_name)
                .filter(|span| !masked[..span.start].trim_end().ends_with('.'))
                .collect()
        };

        let mut out = String::with_capacity(source.len() + spans.len() * name.len());
        let mut last = 0;
        for span in spans {
            out.push_str(&source[last..span.start]);
            out.push_str(name.as_str());
            last = span.end;
        }
        out.push_str(&source[last..]);
        out
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whole-word occurrences of `word` in `text`
fn word_spans<'a>(text: &'a str, word: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
    text.match_indices(word)
        .map(move |(start, _)| start..start + word.len())
        .filter(move |span| {
            let before = text[..span.start].chars().next_back();
            let after = text[span.end..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
}

/// Extracts a contract from raw model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParser {
    license_line: String,
    pragma_line: String,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self {
            license_line: DEFAULT_LICENSE_LINE.to_string(),
            pragma_line: DEFAULT_PRAGMA_LINE.to_string(),
        }
    }
}

impl ResponseParser {
    /// Create parser with the default header lines
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different license line for synthesized headers
    #[inline]
    #[must_use]
    pub fn with_license_line(mut self, line: impl Into<String>) -> Self {
        self.license_line = line.into();
        self
    }

    /// Use a different pragma line for synthesized headers
    #[inline]
    #[must_use]
    pub fn with_pragma_line(mut self, line: impl Into<String>) -> Self {
        self.pragma_line = line.into();
        self
    }

    /// Parse raw model output
    ///
    /// # Errors
    /// - `EmptyResponse` for blank input
    /// - `NoContractFound` when no declaration exists, with a snippet of
    ///   the raw text
    /// - `UnbalancedBraces` when the extracted body does not balance
    pub fn parse(&self, raw: &str) -> Result<ParsedContract, ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyResponse);
        }

        let (candidate_name, body, origin) = match Self::from_fences(raw) {
            Some(found) => found,
            None => Self::from_raw(raw)?,
        };

        let (open, close) = brace_counts(&mask(&body));
        if open != close {
            tracing::debug!(open, close, "extracted body does not balance");
            return Err(ParseError::UnbalancedBraces { open, close });
        }

        let (source_body, header_synthesized) = self.with_header(&body);

        let masked = mask(&source_body);
        let params = find_named_declaration(&source_body, &masked, &candidate_name)
            .map(|decl| constructor_params(&source_body, &masked, &decl))
            .unwrap_or_default();

        let parsed = ParsedContract {
            candidate_name,
            detected_archetype: Archetype::from_source(&source_body),
            source_body,
            header_synthesized,
            constructor_params: params,
            origin,
        };

        tracing::debug!(
            name = %parsed.candidate_name,
            archetype = %parsed.detected_archetype,
            header_synthesized,
            params = parsed.constructor_params.len(),
            "parsed model response"
        );

        Ok(parsed)
    }

    fn from_fences(raw: &str) -> Option<(String, String, SourceOrigin)> {
        let mut blocks = fenced_blocks(raw);
        // Stable: Solidity-tagged blocks first, document order otherwise
        blocks.sort_by_key(|block| !block.is_solidity());

        blocks.into_iter().find_map(|block| {
            let decl = find_declaration(&block.code, &mask(&block.code))?;
            let body = format!("{}\n", block.code.trim());
            Some((
                decl.name,
                body,
                SourceOrigin::Fenced {
                    language: block.language,
                },
            ))
        })
    }

    fn from_raw(raw: &str) -> Result<(String, String, SourceOrigin), ParseError> {
        let masked = mask(raw);
        let decl = find_declaration(raw, &masked).ok_or_else(|| ParseError::no_contract_found(raw))?;
        let start = preamble_start(raw, decl.line_start);

        let Some(end) = matching_close(&masked, decl.open_brace) else {
            let (open, close) = brace_counts(&masked[start..]);
            return Err(ParseError::UnbalancedBraces { open, close });
        };

        let body = format!("{}\n", raw[start..=end].trim());
        Ok((decl.name, body, SourceOrigin::Raw))
    }

    /// Add missing header lines, returning the new body and whether
    /// anything was added
    fn with_header(&self, body: &str) -> (String, bool) {
        let has_license = body.contains("SPDX-License-Identifier");
        let has_pragma = PRAGMA.is_match(&mask(body));

        match (has_license, has_pragma) {
            (true, true) => (body.to_string(), false),
            (false, false) => (
                format!("{}\n{}\n\n{}", self.license_line, self.pragma_line, body),
                true,
            ),
            (false, true) => (format!("{}\n{}", self.license_line, body), true),
            (true, false) => {
                let out = match body.find("SPDX-License-Identifier") {
                    Some(at) => {
                        let line_end = body[at..].find('\n').map_or(body.len(), |nl| at + nl + 1);
                        let (head, tail) = body.split_at(line_end);
                        let sep = if head.ends_with('\n') { "" } else { "\n" };
                        format!("{head}{sep}{}\n{tail}", self.pragma_line)
                    }
                    None => format!("{}\n{}", self.pragma_line, body),
                };
                (out, true)
            }
        }
    }
}
