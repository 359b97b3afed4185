//! Contract archetypes
//!
//! An archetype is a hint, never a requirement. The description pre-pass
//! uses it to steer the prompt; the parser records what the returned
//! source actually inherits.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Recognized contract category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Archetype {
    /// Fungible token
    ERC20,
    /// Non-fungible token
    ERC721,
    /// A contract that is neither of the above
    Generic,
    /// Nothing could be inferred
    #[default]
    Unknown,
}

impl Archetype {
    /// Infer a hint from a free-form description
    ///
    /// Only returns `ERC20`, `ERC721` or `Unknown`; a description alone is
    /// not enough to call something `Generic`.
    #[must_use]
    pub fn from_description(description: &str) -> Self {
        let lowered = description.to_ascii_lowercase().replace("erc-", "erc");
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let has = |needles: &[&str]| words.iter().any(|w| needles.contains(w));

        if has(&["erc721", "nft", "nfts"]) {
            Self::ERC721
        } else if has(&["erc20", "token", "tokens"]) {
            Self::ERC20
        } else {
            Self::Unknown
        }
    }

    /// Classify contract source by what it inherits or imports
    ///
    /// Any source without an ERC721/ERC20 base is `Generic`.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        if source.contains("ERC721") {
            Self::ERC721
        } else if source.contains("ERC20") {
            Self::ERC20
        } else {
            Self::Generic
        }
    }

    /// Stable label used in prompts and logs
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::ERC20 => "ERC20",
            Archetype::ERC721 => "ERC721",
            Archetype::Generic => "Generic",
            Archetype::Unknown => "Unknown",
        }
    }

    /// Whether the archetype names a token standard
    #[inline]
    #[must_use]
    pub fn is_token_standard(&self) -> bool {
        matches!(self, Self::ERC20 | Self::ERC721)
    }
}

impl Display for Archetype {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
