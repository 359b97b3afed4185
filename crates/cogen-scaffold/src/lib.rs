//! cogen scaffold - project materialization
//!
//! Turns a [`ParsedContract`](cogen_parser::ParsedContract) and its
//! [`SanitizedName`](cogen_ident::SanitizedName) into
//! `<output_dir>/<Name>/{contracts,scripts,tests}`:
//! - [`layout`]: path derivation
//! - [`templates`]: Hardhat deployment script and mocha test stub
//! - [`locks`]: path-scoped try-locks
//! - [`scaffolder`]: staged writes with atomic promotion
//!
//! A failed or cancelled run never leaves anything at the final path.

#![warn(unreachable_pub)]

pub mod error;
pub mod layout;
pub mod locks;
pub mod result;
pub mod scaffolder;
pub mod templates;

pub use error::ScaffoldError;
pub use layout::{absolute_lexical, ProjectLayout, ScaffoldOptions, SOURCE_EXT};
pub use locks::{PathLockGuard, PathLocks};
pub use result::GenerationResult;
pub use scaffolder::{ProjectScaffolder, STAGING_PREFIX};
pub use templates::ScriptSyntax;
