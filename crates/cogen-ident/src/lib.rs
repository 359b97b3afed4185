//! cogen identifiers
//!
//! Names flow from three untrusted places: the user's description, the
//! model's `contract <Name>` declaration and the filesystem. This crate
//! turns any of them into one [`SanitizedName`] that every generated
//! artifact can use verbatim.
//!
//! # Example
//!
//! ```rust
//! use cogen_ident::{sanitize, Archetype};
//!
//! let name = sanitize("NFT-Treasury");
//! assert_eq!(name.as_str(), "NFTTreasury");
//! assert_eq!(Archetype::from_description("NFT Treasury"), Archetype::ERC721);
//! ```

#![warn(unreachable_pub)]

pub mod archetype;
pub mod name;

pub use archetype::Archetype;
pub use name::{
    is_reserved, sanitize, IdentifierError, SanitizedName, DEVICE_NAMES, MAX_IDENTIFIER_LEN, RESERVED_NAMES,
};
