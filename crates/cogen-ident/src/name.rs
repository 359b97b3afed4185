//! Sanitized identifiers
//!
//! Provides [`SanitizedName`], the one name every generated artifact uses:
//! the contract file name, the `contract` declaration, the deployment
//! script's factory key and local binding, and the test stub.
//!
//! A sanitized name is ASCII alphanumeric, starts with an upper-case
//! letter, is at most [`MAX_IDENTIFIER_LEN`] bytes and is not one of the
//! [`RESERVED_NAMES`] or [`DEVICE_NAMES`]. Those rules make it valid in Solidity, in JavaScript
//! and as a path component at the same time.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Maximum identifier length in bytes
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Letter prepended when a name would otherwise be empty or start with a digit
pub const DIGIT_PREFIX: char = 'C';

/// Suffix appended to names that collide with a reserved name
pub const RESERVED_SUFFIX: &str = "Contract";

/// Names a generated contract must not take
///
/// The first group are library base contracts a generated contract
/// commonly inherits (`contract ERC721 is ERC721` does not compile). The
/// second group are JavaScript globals a script-level `const` would shadow.
pub const RESERVED_NAMES: &[&str] = &[
    "ERC20",
    "ERC721",
    "ERC1155",
    "ERC4626",
    "Ownable",
    "AccessControl",
    "Context",
    "Pausable",
    "ReentrancyGuard",
    "Counters",
    "Strings",
    "Address",
    "Object",
    "Array",
    "Promise",
    "Error",
    "Map",
    "Set",
    "Number",
    "String",
    "Symbol",
    "Boolean",
    "Function",
    "JSON",
    "Math",
    "Date",
    "BigInt",
    "Proxy",
    "Reflect",
];

/// Device names Windows refuses as a path component, in any case
pub const DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9", "LPT1",
    "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Identifier valid in every downstream artifact
///
/// Construct with [`sanitize`] (total) or [`SanitizedName::parse`]
/// (strict).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SanitizedName(String);

impl SanitizedName {
    /// Parse an already-sanitized identifier
    ///
    /// # Errors
    /// Returns [`IdentifierError`] if `s` breaks any identifier rule.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        check(s)?;
        Ok(Self(s.to_string()))
    }

    /// Re-check the identifier rules
    ///
    /// Sanitizing cannot produce an invalid name; this is the last check
    /// before anything is written to disk.
    ///
    /// # Errors
    /// Returns [`IdentifierError`] if the name breaks any identifier rule.
    #[inline]
    pub fn validate(&self) -> Result<(), IdentifierError> {
        check(&self.0)
    }

    /// Borrow as `&str`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for SanitizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SanitizedName {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SanitizedName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check(&value)?;
        Ok(Self(value))
    }
}

impl From<SanitizedName> for String {
    fn from(name: SanitizedName) -> Self {
        name.0
    }
}

/// Normalize a free-form name into a [`SanitizedName`]
///
/// Pure, total and deterministic. Every character that is not an ASCII
/// letter or digit separates words; words are joined in PascalCase. The
/// result is prefixed, truncated and de-reserved as described on
/// [`SanitizedName`].
///
/// # Examples
/// - `"NFT-Treasury"` → `NFTTreasury`
/// - `"my token_v2"` → `MyTokenV2`
/// - `"721 drop"` → `C721Drop`
/// - `"ERC721"` → `ERC721Contract`
#[must_use]
pub fn sanitize(candidate: &str) -> SanitizedName {
    let mut out = String::with_capacity(candidate.len().min(MAX_IDENTIFIER_LEN));

    for word in candidate
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }

    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, DIGIT_PREFIX);
    }

    out.truncate(MAX_IDENTIFIER_LEN);

    if is_reserved(&out) {
        out.push_str(RESERVED_SUFFIX);
    }

    SanitizedName(out)
}

/// Check whether `name` is reserved
///
/// Matches [`RESERVED_NAMES`] exactly and [`DEVICE_NAMES`] ignoring case.
#[inline]
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name) || DEVICE_NAMES.iter().any(|d| d.eq_ignore_ascii_case(name))
}

fn check(s: &str) -> Result<(), IdentifierError> {
    let Some(first) = s.chars().next() else {
        return Err(IdentifierError::Empty);
    };
    if !first.is_ascii_uppercase() {
        return Err(IdentifierError::InvalidStart(first));
    }
    if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(IdentifierError::InvalidCharacter {
            name: s.to_string(),
            character: bad,
        });
    }
    if s.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            len: s.len(),
            max: MAX_IDENTIFIER_LEN,
        });
    }
    if is_reserved(s) {
        return Err(IdentifierError::Reserved(s.to_string()));
    }
    Ok(())
}

/// Identifier rule violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Empty identifier
    #[error("identifier is empty")]
    Empty,

    /// First character is not an upper-case ASCII letter
    #[error("identifier must start with an upper-case letter, found '{0}'")]
    InvalidStart(char),

    /// Character outside `[A-Za-z0-9]`
    #[error("invalid character '{character}' in identifier '{name}'")]
    InvalidCharacter { name: String, character: char },

    /// Longer than [`MAX_IDENTIFIER_LEN`]
    #[error("identifier too long: {len} bytes (max: {max})")]
    TooLong { len: usize, max: usize },

    /// Collides with a reserved name
    #[error("identifier '{0}' is reserved")]
    Reserved(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names_get_suffix() {
        assert_eq!(sanitize("con").as_str(), "ConContract");
        assert_eq!(sanitize("NUL").as_str(), "NULContract");
        assert_eq!(sanitize("aux").as_str(), "AuxContract");
        assert_eq!(sanitize("com1").as_str(), "Com1Contract");
        assert_eq!(sanitize("Lpt9").as_str(), "Lpt9Contract");
        assert_eq!(sanitize("Com10").as_str(), "Com10");
        assert_eq!(sanitize("Console").as_str(), "Console");
    }

    #[test]
    fn device_names_are_rejected_in_any_case() {
        for raw in ["Con", "CON", "Prn", "Nul", "Com3", "LPT1"] {
            match SanitizedName::parse(raw) {
                Err(IdentifierError::Reserved(name)) => assert_eq!(name, raw),
                other => panic!("expected Reserved, got {:?}", other),
            }
        }
        let name = sanitize("Con");
        assert!(name.validate().is_ok());
        assert_eq!(sanitize(name.as_str()), name);
    }

    #[test]
    fn hyphen_is_stripped() {
        assert_eq!(sanitize("NFT-Treasury").as_str(), "NFTTreasury");
    }

    #[test]
    fn words_collapse_to_pascal_case() {
        assert_eq!(sanitize("nft treasury").as_str(), "NftTreasury");
        assert_eq!(sanitize("my token_v2").as_str(), "MyTokenV2");
        assert_eq!(sanitize("  spaced\tout\n").as_str(), "SpacedOut");
    }

    #[test]
    fn inner_capitals_are_kept() {
        assert_eq!(sanitize("MyNFTCollection").as_str(), "MyNFTCollection");
    }

    #[test]
    fn leading_digit_gets_prefix() {
        assert_eq!(sanitize("721 drop").as_str(), "C721Drop");
    }

    #[test]
    fn empty_and_symbol_only_get_prefix() {
        assert_eq!(sanitize("").as_str(), "C");
        assert_eq!(sanitize("--- !!! ___").as_str(), "C");
    }

    #[test]
    fn non_ascii_is_a_separator() {
        assert_eq!(sanitize("café token").as_str(), "CafToken");
    }

    #[test]
    fn reserved_names_get_suffix() {
        assert_eq!(sanitize("ERC721").as_str(), "ERC721Contract");
        assert_eq!(sanitize("erc20").as_str(), "Erc20");
        assert_eq!(sanitize("ERC20").as_str(), "ERC20Contract");
        assert_eq!(sanitize("object").as_str(), "ObjectContract");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "a".repeat(200);
        let name = sanitize(&long);
        assert_eq!(name.len(), MAX_IDENTIFIER_LEN);
        assert!(name.validate().is_ok());
    }

    #[test]
    fn sanitize_is_idempotent_on_examples() {
        for raw in ["NFT-Treasury", "ERC721", "721 drop", "", "my token_v2"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(once.as_str()), once);
        }
    }

    #[test]
    fn parse_rejects_invalid() {
        assert_eq!(SanitizedName::parse(""), Err(IdentifierError::Empty));
        assert_eq!(
            SanitizedName::parse("nft"),
            Err(IdentifierError::InvalidStart('n'))
        );
        assert!(matches!(
            SanitizedName::parse("NFT-Treasury"),
            Err(IdentifierError::InvalidCharacter { character: '-', .. })
        ));
        assert!(matches!(
            SanitizedName::parse("ERC721"),
            Err(IdentifierError::Reserved(_))
        ));
        assert!(SanitizedName::parse("NFTTreasury").is_ok());
    }

    #[test]
    fn serde_round_trip_checks_rules() {
        let name = sanitize("NFT Treasury");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"NFTTreasury\"");
        let back: SanitizedName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<SanitizedName>("\"bad-name\"").is_err());
    }
}
