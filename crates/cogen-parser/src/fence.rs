//! Fenced code block extraction
//!
//! Uses pulldown-cmark so that nested backticks, tildes and indented
//! fences are handled the way a Markdown renderer would handle them.

use pulldown_cmark::{CodeBlockKind, Event, Parser as MdParser, Tag, TagEnd};

/// Info-string languages treated as Solidity
const SOLIDITY_TAGS: &[&str] = &["solidity", "sol"];

/// Fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// First word of the info string, lower-cased
    pub language: Option<String>,
    /// Block content
    pub code: String,
}

impl FencedBlock {
    /// Whether the block is tagged as Solidity
    #[inline]
    #[must_use]
    pub fn is_solidity(&self) -> bool {
        self.language
            .as_deref()
            .is_some_and(|lang| SOLIDITY_TAGS.contains(&lang))
    }
}

/// Collect every fenced code block in document order
#[must_use]
pub fn fenced_blocks(markdown: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<FencedBlock> = None;

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = info
                    .split_whitespace()
                    .next()
                    .map(str::to_ascii_lowercase);
                current = Some(FencedBlock {
                    language,
                    code: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(ref mut block) = current {
                    block.code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_tagged_and_untagged_blocks() {
        let md = "Intro\n\n```solidity\ncontract A {}\n```\n\ntext\n\n```\nplain\n```\n";
        let blocks = fenced_blocks(md);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("solidity"));
        assert_eq!(blocks[0].code, "contract A {}\n");
        assert!(blocks[0].is_solidity());
        assert_eq!(blocks[1].language, None);
        assert!(!blocks[1].is_solidity());
    }

    #[test]
    fn info_string_is_normalized() {
        let blocks = fenced_blocks("~~~Sol title=\"x\"\ncontract A {}\n~~~\n");
        assert_eq!(blocks[0].language.as_deref(), Some("sol"));
        assert!(blocks[0].is_solidity());
    }

    #[test]
    fn indented_blocks_are_ignored() {
        assert!(fenced_blocks("para\n\n    contract A {}\n").is_empty());
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let blocks = fenced_blocks("```solidity\ncontract A {\n}\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "contract A {\n}\n");
    }
}
