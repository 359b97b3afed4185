//! Provider prompt rendering

use cogen_ident::Archetype;

/// Renders the provider prompt from a description and archetype hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    pragma: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            pragma: cogen_parser::DEFAULT_PRAGMA_LINE.to_string(),
        }
    }
}

impl PromptBuilder {
    /// Create builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the prompt
    #[must_use]
    pub fn build(&self, description: &str, hint: Archetype) -> String {
        let mut prompt = format!(
            "Write a Solidity smart contract for: {}\n\n\
             Requirements:\n\
             - Start with an SPDX license identifier and `{}`.\n\
             - Declare exactly one top-level contract whose name is a single PascalCase word.\n",
            description.trim(),
            self.pragma,
        );

        match hint {
            Archetype::ERC721 => prompt.push_str(
                "- It is a non-fungible token: inherit OpenZeppelin `ERC721` \
                 (import \"@openzeppelin/contracts/token/ERC721/ERC721.sol\").\n",
            ),
            Archetype::ERC20 => prompt.push_str(
                "- It is a fungible token: inherit OpenZeppelin `ERC20` \
                 (import \"@openzeppelin/contracts/token/ERC20/ERC20.sol\").\n",
            ),
            Archetype::Generic | Archetype::Unknown => {}
        }

        prompt.push_str("- Reply with one ```solidity fenced code block and nothing else.\n");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc721_hint_suggests_base() {
        let prompt = PromptBuilder::new().build("  NFT Treasury ", Archetype::ERC721);
        assert!(prompt.starts_with("Write a Solidity smart contract for: NFT Treasury\n"));
        assert!(prompt.contains("ERC721/ERC721.sol"));
        assert!(prompt.contains("pragma solidity ^0.8.20;"));
    }

    #[test]
    fn unknown_hint_adds_nothing() {
        let prompt = PromptBuilder::new().build("escrow", Archetype::Unknown);
        assert!(!prompt.contains("OpenZeppelin"));
        assert!(prompt.ends_with("nothing else.\n"));
    }
}
