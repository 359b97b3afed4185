use cogen_ident::{sanitize, SanitizedName, MAX_IDENTIFIER_LEN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(candidate in ".{0,120}") {
        let once = sanitize(&candidate);
        let twice = sanitize(once.as_str());
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_sanitize_output_is_valid_everywhere(candidate in ".{0,120}") {
        let name = sanitize(&candidate);
        let s = name.as_str();

        // No separators of any kind
        prop_assert!(!s.contains('-'));
        prop_assert!(!s.contains(' '));
        prop_assert!(!s.contains('_'));
        prop_assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        // Solidity / JavaScript identifier and path component
        prop_assert!(s.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert!(s.len() <= MAX_IDENTIFIER_LEN);
        prop_assert!(name.validate().is_ok());
        prop_assert!(SanitizedName::parse(s).is_ok());
    }

    #[test]
    fn prop_sanitize_is_deterministic(candidate in "[a-zA-Z0-9 _\\-.]{0,40}") {
        prop_assert_eq!(sanitize(&candidate), sanitize(&candidate));
    }

    #[test]
    fn prop_separator_choice_does_not_matter(
        words in proptest::collection::vec("[a-z][a-z0-9]{0,8}", 1..5),
    ) {
        let hyphenated = words.join("-");
        let spaced = words.join(" ");
        let underscored = words.join("_");
        prop_assert_eq!(sanitize(&hyphenated), sanitize(&spaced));
        prop_assert_eq!(sanitize(&spaced), sanitize(&underscored));
    }
}

#[test]
fn hyphenated_regression_name() {
    assert_eq!(sanitize("NFT-Treasury").as_str(), "NFTTreasury");
}
