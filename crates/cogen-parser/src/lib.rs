//! cogen parser - contract extraction from model output
//!
//! Generative models wrap code in prose, fence it inconsistently, and
//! sometimes return no code at all. [`ResponseParser`] accepts all of it
//! and either yields a [`ParsedContract`] or says exactly why it could not.
//!
//! - [`fence`]: fenced code blocks via pulldown-cmark
//! - [`mask`]: comment/string masking and brace matching
//! - [`decl`]: `contract` declarations, preambles, constructor parameters
//! - [`parser`]: the end-to-end [`ResponseParser`]
//!
//! # Example
//!
//! ```rust
//! use cogen_parser::ResponseParser;
//!
//! let raw = "Here you go:\n\n```solidity\ncontract NFT-Treasury {}\n```";
//! let parsed = ResponseParser::new().parse(raw).unwrap();
//! assert_eq!(parsed.candidate_name, "NFT-Treasury");
//! assert!(parsed.header_synthesized);
//! ```

#![warn(unreachable_pub)]

pub mod decl;
pub mod error;
pub mod fence;
pub mod mask;
pub mod parser;

pub use decl::ConstructorParam;
pub use error::{ParseError, SNIPPET_LEN};
pub use parser::{ParsedContract, ResponseParser, SourceOrigin, DEFAULT_LICENSE_LINE, DEFAULT_PRAGMA_LINE};
